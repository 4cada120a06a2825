//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use hotset_core::models::{GroupId, ItemId};

/// Log a completed reorder pass.
pub fn pass_completed(group_id: GroupId, top: &[ItemId], suspended: usize, failures: usize) {
    tracing::info!(
        event = "pass_completed",
        group_id = %group_id,
        top = ?top,
        suspended = suspended,
        failures = failures,
        "reorder pass completed"
    );
}

/// Log a reorder pass that failed outright. It is not retried.
pub fn pass_failed(group_id: GroupId, reason: &str) {
    tracing::error!(
        event = "pass_failed",
        group_id = %group_id,
        reason = %reason,
        "reorder pass failed"
    );
}

/// Log a pass deferred behind one already in flight.
pub fn pass_deferred(group_id: GroupId) {
    tracing::debug!(
        event = "pass_deferred",
        group_id = %group_id,
        "reorder pass deferred, group busy"
    );
}

pub fn item_suspended(group_id: GroupId, item_id: ItemId, idle_secs: i64) {
    tracing::info!(
        event = "item_suspended",
        group_id = %group_id,
        item_id = %item_id,
        idle_secs = idle_secs,
        "item suspended"
    );
}

pub fn suspend_failed(item_id: ItemId, reason: &str) {
    tracing::warn!(
        event = "suspend_failed",
        item_id = %item_id,
        reason = %reason,
        "suspend request failed, skipping"
    );
}

pub fn reposition_failed(item_id: ItemId, index: usize, reason: &str) {
    tracing::warn!(
        event = "reposition_failed",
        item_id = %item_id,
        index = index,
        reason = %reason,
        "reposition failed, skipping"
    );
}

pub fn pin_failed(item_id: ItemId, pinned: bool, reason: &str) {
    tracing::warn!(
        event = "pin_failed",
        item_id = %item_id,
        pinned = pinned,
        reason = %reason,
        "pin update failed, skipping"
    );
}

/// Log an item becoming exempt from suspension.
pub fn item_protected(item_id: ItemId) {
    tracing::info!(
        event = "item_protected",
        item_id = %item_id,
        "interaction detected, item protected"
    );
}

pub fn observer_failed(item_id: ItemId, reason: &str) {
    tracing::warn!(
        event = "observer_failed",
        item_id = %item_id,
        reason = %reason,
        "could not install interaction observer"
    );
}

pub fn snapshot_written(group_id: GroupId, items: usize) {
    tracing::debug!(
        event = "snapshot_written",
        group_id = %group_id,
        items = items,
        "snapshot written"
    );
}

pub fn snapshot_failed(group_id: GroupId, reason: &str) {
    tracing::warn!(
        event = "snapshot_failed",
        group_id = %group_id,
        reason = %reason,
        "snapshot write failed"
    );
}

/// Log a persisted setting that could not be used.
pub fn setting_fallback(key: &str, reason: &str, fallback: &str) {
    tracing::warn!(
        event = "setting_fallback",
        key = %key,
        reason = %reason,
        fallback = %fallback,
        "using default for setting"
    );
}
