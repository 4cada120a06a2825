//! # hotset-scheduler
//!
//! Debounced per-group scheduling: bursts of triggering events collapse
//! into one execution, timed from the last event of the burst.

pub mod debounce;

pub use debounce::{DebounceScheduler, TimerToken};
