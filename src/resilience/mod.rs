//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Single-user fetch:
//!     → retry.rs (run attempt, classify failure)
//!     → On transient failure: backoff.rs (compute delay), sleep, try again
//!     → After max retries: last failure goes back to the caller
//! ```
//!
//! # Design Decisions
//! - Only transport-level failures are retried; HTTP statuses never are
//! - Backoff sleeps on the Tokio timer, so waiting never holds a lock
//! - Attempt count is fixed; worst-case latency is bounded

pub mod backoff;
pub mod retry;

pub use retry::{RetryPolicy, Retryable};
