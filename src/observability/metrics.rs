//! Metrics collection.
//!
//! # Metrics
//! - `user_fetcher_cache_lookups_total` (counter): by cache class, hit/miss
//! - `user_fetcher_cache_entries` (gauge): entries currently stored
//! - `user_fetcher_http_requests_total` (counter): by endpoint, outcome
//! - `user_fetcher_retries_total` (counter): backoff retries taken
//!
//! Without an installed recorder these calls are no-ops.

use metrics::{counter, gauge};

use crate::cache::keys::ALL_USERS_KEY;

fn cache_class(key: &str) -> &'static str {
    if key == ALL_USERS_KEY {
        "all_users"
    } else {
        "user"
    }
}

/// Record a cache lookup.
pub fn record_cache_lookup(key: &str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!(
        "user_fetcher_cache_lookups_total",
        "cache" => cache_class(key),
        "result" => result
    )
    .increment(1);
}

/// Record the number of stored cache entries.
pub fn record_cache_size(size: usize) {
    gauge!("user_fetcher_cache_entries").set(size as f64);
}

/// Record one HTTP request to the users API.
pub fn record_request(endpoint: &'static str, outcome: &'static str) {
    counter!(
        "user_fetcher_http_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one backoff retry.
pub fn record_retry() {
    counter!("user_fetcher_retries_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_class() {
        assert_eq!(cache_class("users:all"), "all_users");
        assert_eq!(cache_class("user:12"), "user");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_cache_lookup("user:1", true);
        record_cache_size(3);
        record_request("user", "ok");
        record_retry();
    }
}
