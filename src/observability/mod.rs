//! Observability module
//!
//! Logging and metrics for template rendering. Library code only emits
//! `tracing` events and `metrics` measurements; the binary decides whether a
//! subscriber or recorder is installed.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, init_logging};
pub use metrics::init_metrics;
