use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{GroupId, ItemId};

/// The resource-manager operation that failed for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedOperation {
    Reposition,
    SetPinned,
    Suspend,
}

/// A per-item failure that was logged and skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassFailure {
    pub item_id: ItemId,
    pub operation: FailedOperation,
    pub reason: String,
}

/// What a completed reorder pass did to its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    pub pass_id: String,
    pub group_id: GroupId,
    /// Hot-set size the pass ran with.
    pub top_n: usize,
    /// Hot set in score order.
    pub top: Vec<ItemId>,
    /// Items successfully moved to the front, in the order they were placed.
    pub repositioned: Vec<ItemId>,
    /// Successful pin-state updates (pin mode only).
    pub pin_updates: usize,
    pub suspended: Vec<ItemId>,
    pub protected_skipped: Vec<ItemId>,
    pub failures: Vec<PassFailure>,
    pub snapshot_written: bool,
    pub completed_at: DateTime<Utc>,
}

/// Result of asking the engine to run a pass for a group.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    Completed(PassReport),
    /// The group had no items; nothing was touched.
    Empty,
    /// Another pass was in flight; a follow-up pass was queued behind it.
    Deferred,
}

impl PassOutcome {
    pub fn report(&self) -> Option<&PassReport> {
        match self {
            PassOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}
