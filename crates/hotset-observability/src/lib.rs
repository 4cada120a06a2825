//! # hotset-observability
//!
//! Structured tracing with span definitions, one event helper per notable
//! engine action, and in-process engine metrics.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::EngineMetrics;
pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
