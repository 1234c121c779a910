use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

use crate::core::form::{FormBody, FormError};

/// Errors raised while talking to the upstream CDN API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UpstreamError {
    /// Client settings are unusable (empty base URL or API key, bad timeouts).
    #[error("invalid upstream client configuration: {0}")]
    InvalidConfig(String),

    /// The request body could not be flattened into a form.
    #[error("failed to encode request body: {0}")]
    Encoding(#[from] FormError),

    /// No response was obtained, even after retrying.
    #[error("{method} {url} failed after {attempts} attempt(s): {message}")]
    Transport {
        method: Method,
        url: String,
        attempts: usize,
        message: String,
    },

    /// The upstream answered but the body did not match the expected shape.
    #[error("upstream returned an unexpected body (status {status}): {source}")]
    Decoding {
        status: StatusCode,
        body: Bytes,
        #[source]
        source: serde_json::Error,
    },

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}")]
    Status { status: StatusCode, body: Bytes },
}

/// Result type alias for upstream operations
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// A fully resolved outbound call.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: HeaderMap,
    /// Sent as `application/x-www-form-urlencoded` when present.
    pub form: Option<FormBody>,
}

/// Status and body of an upstream reply, before any decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// UpstreamTransport defines the port for delivering requests to the CDN API
#[async_trait]
pub trait UpstreamTransport: Send + Sync + 'static {
    /// Send `request` and return whatever status the upstream produced.
    ///
    /// Only failures to obtain a response are errors; 4xx/5xx replies are
    /// returned as ordinary [`RawResponse`]s.
    async fn send(&self, request: UpstreamRequest) -> UpstreamResult<RawResponse>;
}
