//! Configuration types for vidfetch

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding the service base URL
pub const BASE_URL_ENV: &str = "VIDFETCH_BASE_URL";

/// Endpoint path and deadline for one operation
///
/// Each operation carries its own policy instead of reading module-level
/// constants, so tests and embedders can override deadlines per client
/// without global mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestPolicy {
    /// Path appended to the base URL (e.g. "/video-info")
    pub path: String,

    /// Maximum wall-clock duration for the whole exchange, in seconds
    #[serde(with = "duration_serde")]
    pub deadline: Duration,
}

impl RequestPolicy {
    /// Create a policy from a path and a deadline
    pub fn new(path: impl Into<String>, deadline: Duration) -> Self {
        Self {
            path: path.into(),
            deadline,
        }
    }
}

/// Client configuration: service base URL plus per-operation request policies
///
/// Works out of the box with zero configuration against a locally running
/// backend. All fields have serde defaults, so a partial config file only
/// needs to name what it changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the extraction service (default: "http://localhost:8000/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Policy for the metadata operation (default: POST /video-info, 60s)
    #[serde(default = "default_video_info_policy")]
    pub video_info: RequestPolicy,

    /// Policy for the download operation (default: POST /download, 300s)
    ///
    /// The download deadline is deliberately five times the metadata deadline:
    /// payload transfer time dominates for full media files.
    #[serde(default = "default_download_policy")]
    pub download: RequestPolicy,

    /// Policy for the health probe (default: GET /health, 10s)
    #[serde(default = "default_health_policy")]
    pub health: RequestPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            video_info: default_video_info_policy(),
            download: default_download_policy(),
            health: default_health_policy(),
        }
    }
}

impl ClientConfig {
    /// Build a config from the environment
    ///
    /// Reads `VIDFETCH_BASE_URL` for the service root; every other field keeps
    /// its default. Trailing slashes on the base URL are trimmed so policy
    /// paths join cleanly.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(default_base_url);

        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Full URL for one operation: base URL + policy path
    pub(crate) fn endpoint(&self, policy: &RequestPolicy) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), policy.path)
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_video_info_policy() -> RequestPolicy {
    RequestPolicy::new("/video-info", Duration::from_secs(60))
}

fn default_download_policy() -> RequestPolicy {
    RequestPolicy::new("/download", Duration::from_secs(300))
}

fn default_health_policy() -> RequestPolicy {
    RequestPolicy::new("/health", Duration::from_secs(10))
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.video_info.path, "/video-info");
        assert_eq!(config.video_info.deadline, Duration::from_secs(60));
        assert_eq!(config.download.path, "/download");
        assert_eq!(config.download.deadline, Duration::from_secs(300));
        assert_eq!(config.health.path, "/health");
        assert_eq!(config.health.deadline, Duration::from_secs(10));
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let config = ClientConfig {
            base_url: "http://host:9000/api/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.endpoint(&config.video_info),
            "http://host:9000/api/video-info"
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "http://other:1234/api"}"#).unwrap();
        assert_eq!(config.base_url, "http://other:1234/api");
        assert_eq!(config.download.deadline, Duration::from_secs(300));
    }

    #[test]
    fn deadline_roundtrips_as_seconds() {
        let policy = RequestPolicy::new("/health", Duration::from_secs(10));
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("\"deadline\":10"));

        let back: RequestPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.deadline, Duration::from_secs(10));
    }
}
