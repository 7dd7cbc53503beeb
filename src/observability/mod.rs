//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! cache / resilience / service produce:
//!     → tracing events (structured fields: user_id, url, error)
//!     → metrics.rs (counters, gauges)
//!
//! The binary installs the subscriber (logging.rs); library users bring
//! their own subscriber and metrics recorder.
//! ```

pub mod logging;
pub mod metrics;
