//! Error definitions for user retrieval.

use thiserror::Error;

use crate::resilience::retry::Retryable;

/// Failures raised by an [`HttpTransport`](crate::transport::HttpTransport)
/// before a complete response is available.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Could not establish a connection to the remote host.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not complete within the transport deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The connection broke while the response body was being read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The request could not be built (bad URL, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Whether the failure is worth retrying.
    ///
    /// Classification is by kind only; response content never makes an
    /// error transient.
    pub fn is_transient(&self) -> bool {
        !matches!(self, TransportError::InvalidRequest(_))
    }
}

/// Errors returned by user retrieval operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection-level failure talking to the API.
    #[error("transport error requesting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The API answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The body is not the expected JSON envelope.
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope parsed but carries no `data` payload.
    #[error("response from {url} has no data payload")]
    MissingData { url: String },

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

impl FetchError {
    /// HTTP status for [`FetchError::HttpStatus`], if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl Retryable for FetchError {
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { source, .. } => source.is_transient(),
            _ => false,
        }
    }
}

/// Result type for retrieval operations.
pub type FetchResult<T> = Result<T, FetchError>;
