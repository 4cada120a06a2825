//! Span definitions per operation: reorder pass and eviction sweep.

/// Create a reorder pass span.
#[macro_export]
macro_rules! reorder_span {
    ($group_id:expr, $pass_id:expr) => {
        tracing::info_span!("hotset.reorder", group_id = %$group_id, pass_id = %$pass_id)
    };
}

/// Create an eviction sweep span.
#[macro_export]
macro_rules! sweep_span {
    ($group_id:expr, $candidates:expr) => {
        tracing::debug_span!("hotset.sweep", group_id = %$group_id, candidates = $candidates)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REORDER: &str = "hotset.reorder";
    pub const SWEEP: &str = "hotset.sweep";
}
