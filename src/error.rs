//! Error types for vidfetch
//!
//! Every public operation in this crate reports failures as a [`RequestError`]
//! carrying an [`ErrorKind`] plus a user-facing message. Classification happens
//! at the boundary where the information is available (HTTP status, transport
//! error, payload inspection) — no raw transport error escapes a public method,
//! and nothing in this crate panics on a failed request.

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for vidfetch operations
pub type Outcome<T> = std::result::Result<T, RequestError>;

/// Machine-readable classification of a failed request
///
/// Callers branch on this to choose a remedy: [`ErrorKind::Timeout`] and
/// [`ErrorKind::Unreachable`] suggest retrying later, while
/// [`ErrorKind::InvalidInput`] means the URL itself needs fixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The service rejected the request (HTTP 400): bad URL or unavailable video
    InvalidInput,

    /// The service endpoint was not found (HTTP 404): backend not reachable
    ServiceUnavailable,

    /// The service failed internally (HTTP 500)
    ServerError,

    /// Any other non-success HTTP status, carrying the status code
    UnknownHttp(u16),

    /// No response arrived within the operation deadline
    Timeout,

    /// The transport failed outright (connection refused, DNS failure, ...)
    Unreachable,

    /// The service answered 2xx but the payload was zero bytes
    EmptyPayload,

    /// The service answered 2xx but the body could not be parsed
    MalformedResponse,
}

impl ErrorKind {
    /// Map a non-success HTTP status code to its error kind
    ///
    /// Buckets: 400 → [`ErrorKind::InvalidInput`], 404 →
    /// [`ErrorKind::ServiceUnavailable`], 500 → [`ErrorKind::ServerError`],
    /// everything else → [`ErrorKind::UnknownHttp`] with the code preserved.
    /// Statuses like 401/403/429 are intentionally left in the coarse bucket.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidInput,
            404 => ErrorKind::ServiceUnavailable,
            500 => ErrorKind::ServerError,
            other => ErrorKind::UnknownHttp(other),
        }
    }
}

/// A failed request: classification plus a user-facing message
///
/// The message is end-user phrasing in the application locale (German, matching
/// the service's frontend); `kind` is the locale-independent contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    /// What went wrong, as a branchable classification
    pub kind: ErrorKind,
    /// Human-readable description, suitable for direct display
    pub message: String,
}

impl RequestError {
    /// Create a new request error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Duck-typed JSON error body returned by the service on failure
///
/// The backend emits `{"error": "..."}` while some intermediaries use
/// `{"message": "..."}`; either key may be absent. Kept separate from HTTP
/// status classification so the two can be tested independently.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ErrorBody {
    /// The `error` key, if present
    #[serde(default)]
    pub error: Option<String>,

    /// The `message` key, if present
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best-effort parse of a response body; anything unparseable yields an
    /// empty body rather than an error
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// Extract the server-provided detail, trying `error` before `message`
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}
