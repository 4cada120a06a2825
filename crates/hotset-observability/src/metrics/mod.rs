//! In-process counters describing engine activity.

mod engine_metrics;

pub use engine_metrics::EngineMetrics;
