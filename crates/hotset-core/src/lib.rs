//! # hotset-core
//!
//! Foundation crate for the hotset engine.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::HotsetConfig;
pub use errors::{HotsetError, HotsetResult};
pub use models::{GroupId, GroupSnapshot, Item, ItemId, PassOutcome, PassReport, UsageRecord};
