//! Timeout-bounded fetch
//!
//! Wraps a single network exchange with a cancellable deadline. The
//! `tokio::time::timeout` future owns both the timer and the in-flight
//! request: on expiry the request future is dropped, which aborts the
//! underlying reqwest transport, and on completion the timer is disarmed
//! with it. One timer, one abort path per call, released on every exit
//! (success, HTTP error, transport error, timeout) — no manual cleanup,
//! no late cancellation after a result is produced.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Failure of one bounded exchange, before any HTTP status interpretation
///
/// A response with a non-success HTTP status is *not* a `FetchError`: any
/// response counts as "arrived". Only the absence of a response within the
/// deadline, or a transport-level breakdown, lands here.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response arrived within the deadline; the request was aborted
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// The transport failed before a response arrived (connection refused,
    /// DNS failure, connection reset mid-body, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Run one network operation under a single deadline
///
/// The deadline spans the whole future, so callers that read the response
/// body inside `op` get send *and* transfer bounded by one shared budget.
pub(crate) async fn bounded<T, F>(deadline: Duration, op: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, reqwest::Error>>,
{
    match tokio::time::timeout(deadline, op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(FetchError::Transport(e)),
        Err(_) => Err(FetchError::Timeout(deadline)),
    }
}

/// Send a request and return the raw response, or fail with
/// [`FetchError::Timeout`] if no response arrives within the deadline
///
/// HTTP error statuses count as "arrived" and are returned as responses;
/// interpreting them is the caller's concern.
pub async fn fetch_with_deadline(
    request: reqwest::RequestBuilder,
    deadline: Duration,
) -> Result<reqwest::Response, FetchError> {
    bounded(deadline, request.send()).await
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn response_arrives_within_deadline() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let request = client.get(format!("{}/ok", mock_server.uri()));
        let response = fetch_with_deadline(request, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn http_error_status_still_counts_as_arrived() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let request = client.get(format!("{}/broken", mock_server.uri()));
        let response = fetch_with_deadline(request, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);
    }

    #[tokio::test]
    async fn missed_deadline_is_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let request = client.get(format!("{}/slow", mock_server.uri()));
        let result = fetch_with_deadline(request, Duration::from_millis(50)).await;
        assert!(matches!(result, Err(FetchError::Timeout(_))));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Bind a listener and drop it so the port is (almost certainly) closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::new();
        let request = client.get(format!("http://{addr}/"));
        let result = fetch_with_deadline(request, Duration::from_secs(5)).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn deadline_spans_body_transfer() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drip"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![0u8; 1024])
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/drip", mock_server.uri());
        let result = bounded(Duration::from_millis(50), async {
            let response = client.get(&url).send().await?;
            let bytes = response.bytes().await?;
            Ok(bytes)
        })
        .await;
        assert!(matches!(result, Err(FetchError::Timeout(_))));
    }
}
