//! Request orchestration against the extraction service
//!
//! [`VideoApiClient`] owns a shared HTTP connection pool and exposes the three
//! service operations: metadata lookup, download, and health probe. Each call
//! runs under its own deadline with its own abort path; failures are classified
//! at this boundary into [`RequestError`] values, and nothing is retried —
//! retry policy belongs to the caller.

use crate::config::ClientConfig;
use crate::error::{ErrorBody, ErrorKind, Outcome, RequestError};
use crate::fetch::{self, FetchError};
use crate::types::{DownloadResult, HealthStatus, VideoMetadata, suggested_filename};
use tracing::{debug, warn};

/// Which operation a failure message should be phrased for
#[derive(Clone, Copy, Debug)]
enum Scope {
    VideoInfo,
    Download,
}

/// Client for the video extraction/download service
///
/// Cheap to clone is not a goal; create one per embedding application and
/// share it by reference. Independent calls on the same client run
/// concurrently, each with its own timer — cancelling one never affects
/// another in flight.
#[derive(Debug)]
pub struct VideoApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl VideoApiClient {
    /// Create a client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client configured from the environment
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// The active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch metadata and available formats for a video URL
    ///
    /// The URL should already have passed
    /// [`is_supported_url`](crate::validate::is_supported_url); this method
    /// sends it to the service as-is. The 60 second default deadline covers
    /// the whole exchange.
    pub async fn fetch_video_info(&self, url: &str) -> Outcome<VideoMetadata> {
        let policy = &self.config.video_info;
        let endpoint = self.config.endpoint(policy);
        debug!(url = %url, "requesting video metadata");

        let request = self
            .http
            .post(&endpoint)
            .json(&serde_json::json!({ "url": url }));

        let result = fetch::bounded(policy.deadline, async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok((status, body))
        })
        .await;

        let (status, body) = match result {
            Ok(arrived) => arrived,
            Err(e) => return Err(transport_failure(Scope::VideoInfo, &e)),
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), url = %url, "metadata request rejected");
            return Err(http_failure(Scope::VideoInfo, status.as_u16(), &body));
        }

        let metadata: VideoMetadata = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "metadata response did not parse");
            RequestError::new(ErrorKind::MalformedResponse, "Ungültige Antwort vom Server")
        })?;

        debug!(
            title = %metadata.title,
            formats = metadata.formats.len(),
            "video metadata received"
        );
        Ok(metadata)
    }

    /// Download a video in the chosen format
    ///
    /// `format_id` must come from a prior [`fetch_video_info`] result and is
    /// passed to the service verbatim; `title` is only used to derive the
    /// suggested filename. The 300 second default deadline covers header
    /// arrival and the full payload transfer, since transfer time dominates
    /// for media files. A 2xx response with zero payload bytes is a failure
    /// ([`ErrorKind::EmptyPayload`]), never a success.
    ///
    /// [`fetch_video_info`]: VideoApiClient::fetch_video_info
    pub async fn download_video(
        &self,
        url: &str,
        format_id: &str,
        title: &str,
    ) -> Outcome<DownloadResult> {
        let policy = &self.config.download;
        let endpoint = self.config.endpoint(policy);
        debug!(url = %url, format_id = %format_id, "requesting download");

        let request = self
            .http
            .post(&endpoint)
            .json(&serde_json::json!({ "url": url, "format_id": format_id }));

        let result = fetch::bounded(policy.deadline, async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok((status, body))
        })
        .await;

        let (status, body) = match result {
            Ok(arrived) => arrived,
            Err(e) => return Err(transport_failure(Scope::Download, &e)),
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), url = %url, "download request rejected");
            return Err(http_failure(Scope::Download, status.as_u16(), &body));
        }

        if body.is_empty() {
            warn!(url = %url, "download returned success status with empty payload");
            return Err(RequestError::new(
                ErrorKind::EmptyPayload,
                "Download fehlgeschlagen: leere Datei empfangen",
            ));
        }

        debug!(bytes = body.len(), "download complete");
        Ok(DownloadResult {
            data: body.to_vec(),
            suggested_filename: suggested_filename(title),
        })
    }

    /// Probe the service's health endpoint
    ///
    /// Always produces a value — this is the one operation with no failure
    /// path, since callers use it for passive diagnostics. The 10 second
    /// default deadline keeps the probe lightweight. The response body is
    /// parsed best-effort; a body that is not JSON leaves `detail` absent
    /// without affecting `reachable`.
    pub async fn check_health(&self) -> HealthStatus {
        let policy = &self.config.health;
        let endpoint = self.config.endpoint(policy);
        let request = self.http.get(&endpoint);

        let result = fetch::bounded(policy.deadline, async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok((status, body))
        })
        .await;

        match result {
            Ok((status, body)) if status.is_success() => HealthStatus {
                reachable: true,
                message: "Backend erreichbar".to_string(),
                detail: serde_json::from_slice(&body).ok(),
            },
            Ok((status, _)) => {
                warn!(status = status.as_u16(), "health probe got error status");
                HealthStatus {
                    reachable: false,
                    message: format!("Backend meldet HTTP {}", status.as_u16()),
                    detail: None,
                }
            }
            Err(FetchError::Timeout(deadline)) => {
                warn!(deadline = ?deadline, "health probe timed out");
                HealthStatus {
                    reachable: false,
                    message: "Backend antwortet nicht (Zeitüberschreitung)".to_string(),
                    detail: None,
                }
            }
            Err(FetchError::Transport(e)) => {
                warn!(error = %e, "health probe transport failure");
                HealthStatus {
                    reachable: false,
                    message: format!("Backend nicht erreichbar: {e}"),
                    detail: None,
                }
            }
        }
    }
}

/// Convert a fetch failure into the operation-scoped outcome
fn transport_failure(scope: Scope, error: &FetchError) -> RequestError {
    match (scope, error) {
        (Scope::VideoInfo, FetchError::Timeout(_)) => {
            warn!(scope = ?scope, "metadata request timed out");
            RequestError::new(
                ErrorKind::Timeout,
                "Server antwortet nicht (Zeitüberschreitung)",
            )
        }
        (Scope::Download, FetchError::Timeout(_)) => {
            warn!(scope = ?scope, "download timed out");
            RequestError::new(ErrorKind::Timeout, "Zeitüberschreitung beim Download")
        }
        (Scope::VideoInfo, FetchError::Transport(e)) => {
            warn!(scope = ?scope, error = %e, "metadata request transport failure");
            RequestError::new(ErrorKind::Unreachable, "Keine Verbindung zum Server")
        }
        (Scope::Download, FetchError::Transport(e)) => {
            warn!(scope = ?scope, error = %e, "download transport failure");
            RequestError::new(
                ErrorKind::Unreachable,
                "Download fehlgeschlagen: keine Verbindung zum Server",
            )
        }
    }
}

/// Classify a non-success HTTP response into the operation-scoped outcome
///
/// The status picks the [`ErrorKind`]; the scope picks the base phrasing; a
/// server-provided error detail, when the body has one, is appended.
fn http_failure(scope: Scope, status: u16, body: &[u8]) -> RequestError {
    let kind = ErrorKind::from_status(status);
    let base = match (scope, kind) {
        (Scope::VideoInfo, ErrorKind::InvalidInput) => {
            "Ungültige URL oder Video nicht verfügbar".to_string()
        }
        (Scope::VideoInfo, ErrorKind::ServiceUnavailable) => "Backend nicht erreichbar".to_string(),
        (Scope::VideoInfo, ErrorKind::ServerError) => {
            "Serverfehler beim Laden der Video-Informationen".to_string()
        }
        (Scope::VideoInfo, _) => format!("Unerwarteter Fehler (HTTP {status})"),
        (Scope::Download, ErrorKind::InvalidInput) => "Download fehlgeschlagen".to_string(),
        (Scope::Download, ErrorKind::ServiceUnavailable) => {
            "Download-Dienst nicht erreichbar".to_string()
        }
        (Scope::Download, ErrorKind::ServerError) => "Serverfehler beim Download".to_string(),
        (Scope::Download, _) => format!("Unerwarteter Fehler beim Download (HTTP {status})"),
    };

    let message = match ErrorBody::parse(body).into_message() {
        Some(detail) => format!("{base}: {detail}"),
        None => base,
    };
    RequestError::new(kind, message)
}
