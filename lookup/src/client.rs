//! HTTP client for the stored-image endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use facegate_types::image::JPEG_MIME;
use facegate_types::ImageBytes;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use crate::LookupError;

/// Raw JSON response: `{"stored_image": "<base64 jpeg>"}`.
#[derive(Debug, Deserialize)]
struct StoredImageResponse {
    #[serde(default)]
    stored_image: Option<String>,
}

/// A user's reference image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredImage {
    pub username: String,
    pub image: ImageBytes,
}

impl StoredImage {
    /// `data:` URI suitable for embedding in an HTML `img` tag.
    pub fn data_uri(&self) -> String {
        format!("data:{JPEG_MIME};base64,{}", STANDARD.encode(self.image.as_slice()))
    }
}

/// Client for `GET {server}/users/{username}/images`.
#[derive(Clone, Debug)]
pub struct StoredImageClient {
    http: reqwest::Client,
    base: Url,
}

impl StoredImageClient {
    pub fn new(server_url: &str, timeout: Option<Duration>) -> Result<Self, LookupError> {
        let base = Url::parse(server_url)
            .map_err(|e| LookupError::InvalidEndpoint(format!("{server_url}: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(LookupError::InvalidEndpoint(format!(
                "server URL must be http(s): {server_url}"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        Ok(Self { http, base })
    }

    /// The URL queried for `username`. The username is percent-encoded as a
    /// single path segment.
    pub fn image_url(&self, username: &str) -> Result<Url, LookupError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "images"]);
        Ok(url)
    }

    /// Fetch the stored image for `username`.
    ///
    /// `Ok(None)` when the service answers but holds no image for the user.
    pub async fn fetch(&self, username: &str) -> Result<Option<StoredImage>, LookupError> {
        let url = self.image_url(username)?;

        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                LookupError::Unreachable(format!("connection failed: {e}"))
            } else {
                LookupError::RequestFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(LookupError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body: StoredImageResponse = response.json().await.map_err(|e| {
            LookupError::InvalidResponse(format!("failed to parse image response: {e}"))
        })?;

        let encoded = match body.stored_image {
            Some(encoded) if !encoded.is_empty() => encoded,
            _ => {
                tracing::info!(username, "no stored image");
                return Ok(None);
            }
        };

        let bytes = STANDARD.decode(encoded.trim()).map_err(|e| {
            LookupError::InvalidResponse(format!("stored_image is not base64: {e}"))
        })?;
        let image = ImageBytes::new(bytes);
        tracing::info!(username, bytes = image.len(), "stored image fetched");

        Ok(Some(StoredImage {
            username: username.to_string(),
            image,
        }))
    }
}
