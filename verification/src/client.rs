//! HTTP client for the recognition service's login endpoint.

use async_trait::async_trait;
use facegate_types::VerificationResult;
use std::time::{Duration, Instant};

use crate::classify::{classify_body, classify_rejection, classify_transport_error};
use crate::{EncodeError, EvidencePayload, VerificationError, Verifier};

/// Default login path appended to the server URL.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Client for `POST {server}/login`.
///
/// There is no timeout unless one is configured: a hung request keeps the
/// flow in its verifying state until the connection resolves.
#[derive(Clone, Debug)]
pub struct VerificationClient {
    /// HTTP client (reusable connection pool).
    http: reqwest::Client,
    /// Fully resolved login URL.
    endpoint: String,
}

impl VerificationClient {
    /// Create a client for `{server_url}{login_path}`.
    pub fn new(
        server_url: &str,
        login_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, VerificationError> {
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(VerificationError::InvalidEndpoint(format!(
                "server URL must be http(s): {server_url}"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| VerificationError::Client(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/{}",
                server_url.trim_end_matches('/'),
                login_path.trim_start_matches('/')
            ),
        })
    }

    /// The configured login URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, payload: EvidencePayload) -> Result<VerificationResult, EncodeError> {
        let form = payload.into_form()?;

        let response = match self.http.post(&self.endpoint).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => return Ok(classify_transport_error(&e)),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Ok(classify_transport_error(&e)),
        };

        if !status.is_success() {
            return Ok(classify_rejection(status.as_u16(), &body));
        }

        Ok(match serde_json::from_slice(&body) {
            Ok(value) => classify_body(value),
            Err(e) => facegate_types::TransportFailure::MalformedResponse {
                detail: format!("response is not JSON: {e}"),
            }
            .into(),
        })
    }
}

#[async_trait]
impl Verifier for VerificationClient {
    async fn verify(&self, payload: EvidencePayload) -> VerificationResult {
        let identifier = payload.identifier().clone();
        tracing::info!(
            endpoint = %self.endpoint,
            identifier = %identifier,
            image_bytes = payload.image().len(),
            "submitting verification request"
        );

        let started = Instant::now();
        let result = self.send(payload).await.unwrap_or_else(|e| {
            facegate_types::TransportFailure::Network {
                detail: format!("request could not be built: {e}"),
            }
            .into()
        });

        let elapsed = facegate_utils::format_elapsed(started.elapsed());
        match &result {
            VerificationResult::TransportFailure(failure) => {
                tracing::warn!(identifier = %identifier, elapsed = %elapsed, "verification failed: {failure}");
            }
            other => {
                tracing::info!(identifier = %identifier, elapsed = %elapsed, outcome = other.kind(), "verification completed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_cleanly() {
        let client = VerificationClient::new("http://localhost:5000/", "/login", None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/login");

        let client = VerificationClient::new("http://localhost:5000", "login", None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/login");
    }

    #[test]
    fn non_http_server_is_rejected() {
        assert!(matches!(
            VerificationClient::new("ftp://host", DEFAULT_LOGIN_PATH, None),
            Err(VerificationError::InvalidEndpoint(_))
        ));
    }
}
