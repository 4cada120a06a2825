//! # hotset-eviction
//!
//! Suspends stale items outside a group's hot set.
//!
//! ## Modules
//!
//! - `guard` — `ModificationGuard`, per-item protected flag with load cycles
//! - `policy` — `EvictionPolicy`, pure suspend/skip decision per item
//! - `manager` — `EvictionManager`, the sweep that issues suspend requests

pub mod guard;
pub mod manager;
pub mod policy;

pub use guard::ModificationGuard;
pub use manager::{EvictionManager, SweepReport};
pub use policy::{EvictionDecision, EvictionPolicy, EvictionReason};
