//! # hotset-storage
//!
//! Persistence for the hotset engine.
//!
//! ## Modules
//!
//! - `memory_store` — `MemoryStore`, a process-local key-value store
//! - `sqlite_store` — `SqliteStore`, a single-table SQLite key-value store
//! - `snapshot` — `SnapshotStore`, per-group recall snapshots
//! - `settings` — reading the persisted hot-set size with fallback

pub mod memory_store;
pub mod migrations;
pub mod settings;
pub mod snapshot;
pub mod sqlite_store;

pub use memory_store::MemoryStore;
pub use settings::read_top_n;
pub use snapshot::SnapshotStore;
pub use sqlite_store::SqliteStore;

use hotset_core::errors::{HotsetError, StoreError};

/// Convert a SQLite error message into a `HotsetError`.
pub(crate) fn to_store_err(message: String) -> HotsetError {
    StoreError::SqliteError { message }.into()
}
