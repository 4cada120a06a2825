//! # hotset-ranking
//!
//! Usage scoring and hot-set selection.
//!
//! ## Modules
//!
//! - `tracker` — `ScoreTracker`, per-group usage tables fed by activity events
//! - `prioritize` — `PrioritizationEngine`, stable descending top-N selection

pub mod prioritize;
pub mod tracker;

pub use prioritize::{PrioritizationEngine, RankedItem};
pub use tracker::ScoreTracker;
