//! Cache adapter.
//!
//! # Responsibilities
//! - Store fetched users under string keys with a per-entry TTL
//! - Never hand back an entry whose TTL has elapsed
//!
//! # Design Decisions
//! - Expiry is checked lazily on read; there is no background sweeper
//! - Unbounded by design; `purge_expired` is available for callers that
//!   want to trim
//! - Time comes from `tokio::time::Instant` so paused-clock tests can
//!   advance past a TTL

pub mod keys;
pub mod memory;

use std::time::Duration;

use crate::model::User;

pub use memory::MemoryCache;

/// A value the retrieval service keeps in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// A single user (key `user:{id}`).
    User(User),
    /// The full collection in API order (key `users:all`).
    Users(Vec<User>),
}

/// Key/value store with per-entry expiry.
pub trait UserCache: Send + Sync {
    /// Look up a live entry.
    fn get(&self, key: &str) -> Option<CachedValue>;

    /// Insert or replace an entry that expires `ttl` from now.
    fn set(&self, key: &str, value: CachedValue, ttl: Duration);
}
