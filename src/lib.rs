//! User Fetcher Library
//!
//! Fetches user records from a paginated REST API, normalizes them, caches
//! them with per-entry expiry, and retries transient single-user failures
//! with exponential backoff.
//!
//! ```text
//!   caller ──▶ service ──▶ cache ──(hit)──────────────────────────▶ caller
//!                 │
//!                 └─(miss)─▶ resilience ──▶ transport ──▶ users API
//!                               (retry)        │
//!                                              ▼
//!                            model::wire ──▶ model::User ──▶ cache ──▶ caller
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod resilience;
pub mod service;
pub mod transport;

pub use cache::{CachedValue, MemoryCache, UserCache};
pub use config::FetcherConfig;
pub use error::{FetchError, FetchResult, TransportError};
pub use model::User;
pub use resilience::RetryPolicy;
pub use service::{CacheTtls, UserDirectory, UserService};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
