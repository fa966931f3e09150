//! # vidfetch
//!
//! Client library for a yt-dlp based video download service. Submits a video
//! URL (YouTube, TikTok, Reddit), retrieves metadata and available formats,
//! downloads a chosen format, and keeps a capped local history of completed
//! downloads. The extraction service itself is a black-box HTTP collaborator;
//! this crate is the request orchestration layer in front of it: per-operation
//! deadlines, failure classification into actionable messages, and correct
//! handling of the binary response stream.
//!
//! ## Design Philosophy
//!
//! vidfetch is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Failure-as-value** - Every operation returns a classified outcome;
//!   nothing panics, no raw transport error escapes
//! - **Deadline-owned** - Each call owns exactly one timer and abort path,
//!   released on every exit; cancelling one call never affects another
//! - **Retry-free** - A failed call surfaces its outcome once; retry policy
//!   belongs to the embedder
//!
//! ## Quick Start
//!
//! ```no_run
//! use vidfetch::{ClientConfig, VideoApiClient, is_supported_url};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VideoApiClient::new(ClientConfig::default());
//!
//!     let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
//!     if !is_supported_url(url) {
//!         return Err("unsupported platform".into());
//!     }
//!
//!     let metadata = client.fetch_video_info(url).await?;
//!     if let Some(format) = metadata.formats.first() {
//!         let result = client
//!             .download_video(url, &format.format_id, &metadata.title)
//!             .await?;
//!         std::fs::write(&result.suggested_filename, &result.data)?;
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Request orchestration against the extraction service
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Timeout-bounded fetch
pub mod fetch;
/// Local download history
pub mod history;
/// Core data types
pub mod types;
/// URL validation against the supported-platform allow-list
pub mod validate;

// Re-export commonly used types
pub use client::VideoApiClient;
pub use config::{ClientConfig, RequestPolicy};
pub use error::{ErrorBody, ErrorKind, Outcome, RequestError};
pub use fetch::{FetchError, fetch_with_deadline};
pub use history::DownloadHistory;
pub use types::{
    DownloadResult, FormatDescriptor, HealthStatus, HistoryEntry, VideoMetadata,
    suggested_filename,
};
pub use validate::is_supported_url;
