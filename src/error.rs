//! Error types for cloud metadata operations.

use thiserror::Error;

/// Errors that can occur when detecting a provider or fetching metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// No provider's metadata service answered the detection probe.
    #[error("unknown cloud provider")]
    UnknownProvider,

    /// The requested field does not exist on this instance.
    #[error("metadata not found")]
    NotFound,

    /// The IPv6 list was returned but contained no addresses.
    #[error("no IPv6 addresses found")]
    NoIpv6Addresses,

    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// HTTP error with status code.
    #[error("http {0}")]
    Http(u16),

    /// Response was not valid UTF-8.
    #[error("invalid utf-8")]
    Utf8,

    /// JSON serialization error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Operation not supported for this provider.
    #[error("operation not supported for this provider")]
    NotSupported,

    /// Response exceeds maximum allowed size.
    #[error("response too large: {0} bytes exceeds limit of {1} bytes")]
    TooLarge(usize, usize),
}

impl MetadataError {
    /// Whether this error came from the fetch itself (transport, status, body)
    /// rather than from the field being absent.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            MetadataError::Timeout
                | MetadataError::Http(_)
                | MetadataError::Utf8
                | MetadataError::Request(_)
                | MetadataError::TooLarge(..)
        )
    }
}
