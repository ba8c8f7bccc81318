//! ImgBB image hosting client.
//!
//! Images are sent base64 encoded in the `image` form field of a multipart
//! POST; the API key travels in the query string, so request URLs are
//! stripped from transport errors before they reach logs or Sentry.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ImgBB upload endpoint.
const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Errors that can occur when uploading an image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request carried no image.
    #[error("No image provided")]
    NoImage,

    /// `IMGBB_API_KEY` is not set.
    #[error("ImgBB API key not configured")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// ImgBB answered but did not accept the image.
    #[error("ImgBB rejected the upload: {0}")]
    Rejected(String),
}

impl UploadError {
    /// Message shown to the admin.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::NoImage => "No image provided",
            Self::MissingApiKey => "ImgBB API key not configured",
            Self::Http(_) | Self::Rejected(_) => "Failed to upload to ImgBB",
        }
    }
}

/// Hosted image URLs returned to the admin UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    pub display_url: String,
    pub delete_url: String,
}

#[derive(Debug, Deserialize)]
struct ImgbbResponse {
    #[serde(default)]
    success: bool,
    data: Option<UploadedImage>,
    #[serde(default)]
    status: Option<u16>,
}

impl ImgbbResponse {
    fn into_image(self) -> Result<UploadedImage, UploadError> {
        match self.data {
            Some(image) if self.success => Ok(image),
            _ => Err(UploadError::Rejected(format!(
                "status {}",
                self.status.map_or_else(|| "unknown".to_string(), |s| s.to_string())
            ))),
        }
    }
}

/// ImgBB API client.
#[derive(Clone)]
pub struct ImgbbClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    endpoint: String,
}

impl ImgbbClient {
    /// Create a client. Uploads fail with [`UploadError::MissingApiKey`]
    /// when `api_key` is `None`.
    #[must_use]
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self::with_endpoint(api_key, UPLOAD_URL)
    }

    /// Create a client that posts to `endpoint` instead of the public API.
    #[must_use]
    pub fn with_endpoint(api_key: Option<SecretString>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    /// Upload raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::NoImage` for empty input, `MissingApiKey` when
    /// no key is configured, and `Http`/`Rejected` when ImgBB fails.
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, bytes: &[u8]) -> Result<UploadedImage, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::NoImage);
        }
        let api_key = self.api_key.as_ref().ok_or(UploadError::MissingApiKey)?;

        let form = reqwest::multipart::Form::new().text("image", encode_image(bytes));
        let url = format!("{}?key={}", self.endpoint, api_key.expose_secret());

        let response: ImgbbResponse = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        let image = response.into_image()?;
        tracing::info!(url = %image.url, "Image uploaded");
        Ok(image)
    }
}

/// Base64 payload for the `image` field.
fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
