mod item;
mod pass_report;
mod snapshot;
mod usage;

pub use item::{GroupId, Item, ItemId};
pub use pass_report::{FailedOperation, PassFailure, PassOutcome, PassReport};
pub use snapshot::{GroupSnapshot, SnapshotBook, SnapshotEntry};
pub use usage::UsageRecord;
