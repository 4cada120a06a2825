//! # hotset-engine
//!
//! Keeps the most-used items of each group in front and suspends stale ones.
//!
//! Collaborator events feed a per-group usage table; a debounced reorder
//! pass then ranks the group, moves (or pins) the hot set to the front,
//! sweeps the rest for idle items, and records a recall snapshot.
//!
//! ## Modules
//!
//! - `engine` — `HotsetEngine`, the event API and queries
//! - `pass` — the reorder pass itself
//! - `registry` — per-group pass state (one in-flight pass per group)

pub mod engine;
mod pass;
pub mod registry;

pub use engine::HotsetEngine;
pub use registry::GroupRegistry;

pub use hotset_ranking::RankedItem;
