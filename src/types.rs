//! Core data types: video metadata, formats, download results, health status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured metadata for one video, as returned by the extraction service
///
/// Immutable once returned; owned by the caller for the lifetime of one
/// metadata/selection/download cycle. Fields absent from the service payload
/// stay `None` — never a zero or empty-string sentinel — so callers can
/// distinguish "unknown" from "zero".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,

    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail: String,

    /// Duration in seconds, if known
    #[serde(default)]
    pub duration: Option<u64>,

    /// Uploader/channel name, if known
    #[serde(default)]
    pub uploader: Option<String>,

    /// View count, if known
    #[serde(default)]
    pub view_count: Option<u64>,

    /// Selectable encoding formats, best quality first; empty when the service
    /// omits the field
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>,
}

/// One selectable encoding/resolution variant of a video
///
/// `format_id` is opaque and unique within one [`VideoMetadata`]; it must be
/// passed back verbatim when requesting the download.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Opaque format identifier assigned by the extraction service
    pub format_id: String,

    /// Explicit height in pixels, when the service sends one
    #[serde(default)]
    pub height: Option<u32>,

    /// Resolution string ("1920x1080", "720p", "unknown"), when the service
    /// sends one instead of an explicit height
    #[serde(default)]
    pub resolution: Option<String>,

    /// Container/file extension (e.g. "mp4")
    pub ext: String,

    /// File size in bytes, if known
    #[serde(default)]
    pub filesize: Option<u64>,

    /// Free-form quality note from the extractor (e.g. "720p", "medium")
    #[serde(default)]
    pub format_note: Option<String>,
}

impl FormatDescriptor {
    /// Height in pixels, preferring an explicit `height` field and otherwise
    /// parsing the `resolution` string
    pub fn height_px(&self) -> Option<u32> {
        self.height
            .or_else(|| self.resolution.as_deref().and_then(parse_height))
    }
}

/// Extract the pixel height from a resolution string
///
/// Accepts the `WIDTHxHEIGHT` form ("1920x1080") and the `HEIGHTp` form
/// ("720p"). Anything else, including "unknown", yields `None`.
pub(crate) fn parse_height(resolution: &str) -> Option<u32> {
    let resolution = resolution.trim();
    if let Some((_, height)) = resolution.rsplit_once('x') {
        return height.parse().ok();
    }
    resolution.strip_suffix('p').and_then(|h| h.parse().ok())
}

/// A completed download: the media payload plus what is needed to persist it
///
/// Invariant: `data` is never empty — a 2xx response with zero bytes is
/// reported as a failure, not wrapped in this type.
#[derive(Clone, Debug)]
pub struct DownloadResult {
    /// Raw media payload, exactly as received
    pub data: Vec<u8>,

    /// Filename to save the payload under, derived from the video title
    pub suggested_filename: String,
}

/// Derive a safe download filename from a video title
///
/// Keeps alphanumerics, spaces, `-` and `_`, trims trailing whitespace and
/// caps the stem at 100 characters, mirroring the service's own sanitization.
/// Empty or fully-stripped titles fall back to "video".
pub fn suggested_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .take(100)
        .collect();
    let stem = stem.trim_end();

    if stem.is_empty() {
        "video.mp4".to_string()
    } else {
        format!("{stem}.mp4")
    }
}

/// Result of one health probe against the service
///
/// Ephemeral: recomputed on every probe, never cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Whether the service answered with a success status
    pub reachable: bool,

    /// Human-readable summary of the probe result
    pub message: String,

    /// Whatever JSON the health endpoint returned, if it parsed
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// One completed download, as recorded in the local history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Video title at download time
    pub title: String,

    /// Thumbnail URL at download time
    pub thumbnail: String,

    /// The video URL that was downloaded
    pub url: String,

    /// When the download completed
    pub downloaded_at: DateTime<Utc>,
}
