//! HTTP transport.
//!
//! # Responsibilities
//! - Issue GET requests and hand back status + body
//! - Keep connection-level failures (`TransportError`) apart from responses
//!   that arrived with a non-2xx status
//!
//! The retrieval service only sees the [`HttpTransport`] trait, so tests can
//! script responses without a socket.

pub mod http;

use async_trait::async_trait;

use crate::error::TransportError;

pub use http::ReqwestTransport;

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can GET a URL.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}
