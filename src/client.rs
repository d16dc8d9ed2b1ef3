//! HTTP client wrapper and response classification for metadata requests.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::error::MetadataError;

/// Connection-establishment timeout for metadata requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Total timeout for a single metadata request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Largest metadata response body accepted.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Default metadata service base URL (link-local address).
pub const DEFAULT_BASE_URL: &str = "http://169.254.169.254";

/// AWS spells its default with a trailing slash; it is trimmed like any other.
pub const AWS_DEFAULT_BASE_URL: &str = "http://169.254.169.254/";

/// Settings used to build a provider's HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Replaces every provider's default address (for testing).
    pub base_url: Option<String>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_body_size: usize,
}

impl ClientConfig {
    /// Configuration with the default timeouts and no base URL override.
    pub const fn new() -> Self {
        Self {
            base_url: None,
            connect_timeout: CONNECT_TIMEOUT,
            timeout: REQUEST_TIMEOUT,
            max_body_size: MAX_BODY_SIZE,
        }
    }

    /// Point every provider at `base_url` instead of its well-known address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client wrapper for metadata service requests.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    inner: Client,
    base_url: String,
    max_body_size: usize,
}

impl MetadataClient {
    /// Create a client from `config`, falling back to `default_base_url`
    /// when the config carries no override.
    pub fn new(config: &ClientConfig, default_base_url: &str) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(false)
            .build()?;
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(default_base_url);
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_body_size: config.max_body_size,
        })
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Full URL for a metadata path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request` and classify the response as a trimmed text value.
    pub async fn fetch_text(&self, request: RequestBuilder) -> Result<String, MetadataError> {
        let response = send(request).await?;
        read_text(response, self.max_body_size).await
    }
}

fn transport_error(err: reqwest::Error) -> MetadataError {
    if err.is_timeout() {
        MetadataError::Timeout
    } else {
        MetadataError::Request(err)
    }
}

/// Send a request, mapping timeouts to `MetadataError::Timeout`.
pub async fn send(request: RequestBuilder) -> Result<Response, MetadataError> {
    request.send().await.map_err(transport_error)
}

/// Classify a metadata response.
///
/// 200 yields the body with surrounding whitespace trimmed, 404 yields
/// `NotFound`, and every other status yields `Http(status)`. The AWS token
/// endpoint does not go through here; its body is kept untrimmed.
pub async fn read_text(response: Response, max_size: usize) -> Result<String, MetadataError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(MetadataError::NotFound);
    }
    if status != StatusCode::OK {
        return Err(MetadataError::Http(status.as_u16()));
    }

    let body = read_body_limited(response, max_size).await?;
    let text = String::from_utf8(body).map_err(|_| MetadataError::Utf8)?;
    Ok(text.trim().to_string())
}

/// Read a response body, failing with `TooLarge` once it exceeds `max_size`.
///
/// `Content-Length` is checked first so an oversized body is rejected before
/// any of it is read.
pub async fn read_body_limited(
    mut response: Response,
    max_size: usize,
) -> Result<Vec<u8>, MetadataError> {
    if let Some(content_length) = response.content_length() {
        if content_length as usize > max_size {
            return Err(MetadataError::TooLarge(content_length as usize, max_size));
        }
    }

    let capacity = response
        .content_length()
        .map(|cl| (cl as usize).min(max_size))
        .unwrap_or(max_size.min(8192));
    let mut body = Vec::with_capacity(capacity);

    while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
        let total = body.len().saturating_add(chunk.len());
        if total > max_size {
            return Err(MetadataError::TooLarge(total, max_size));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
