//! ScoreTracker — per-group usage tables via DashMap.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use hotset_core::config::RankingConfig;
use hotset_core::models::{GroupId, ItemId, UsageRecord};

/// Thread-safe usage tracker. One table per group, created on the first
/// qualifying event and dropped once its last record is deleted.
pub struct ScoreTracker {
    groups: DashMap<GroupId, HashMap<ItemId, UsageRecord>>,
    /// Which group currently holds a record for an item.
    owners: DashMap<ItemId, GroupId>,
    activation_weight: f64,
    load_complete_weight: f64,
}

impl ScoreTracker {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            groups: DashMap::new(),
            owners: DashMap::new(),
            activation_weight: config.activation_weight,
            load_complete_weight: config.load_complete_weight,
        }
    }

    /// Item became the active item of its group. Returns the new score.
    pub fn record_activation(&self, item_id: ItemId, group_id: GroupId, now: DateTime<Utc>) -> f64 {
        self.bump(item_id, group_id, self.activation_weight, now)
    }

    /// The active item of a group finished loading. Returns the new score.
    pub fn record_load_completed(
        &self,
        item_id: ItemId,
        group_id: GroupId,
        now: DateTime<Utc>,
    ) -> f64 {
        self.bump(item_id, group_id, self.load_complete_weight, now)
    }

    fn bump(&self, item_id: ItemId, group_id: GroupId, weight: f64, now: DateTime<Utc>) -> f64 {
        // An item belongs to one group at a time: a record under another
        // group means we missed its detach.
        if let Some(previous) = self.owners.insert(item_id, group_id) {
            if previous != group_id {
                self.remove_record(previous, item_id);
            }
        }

        let mut table = self.groups.entry(group_id).or_default();
        table
            .entry(item_id)
            .or_insert_with(|| UsageRecord::new(now))
            .bump(weight, now)
    }

    /// Delete the record for an item that was removed from or detached out
    /// of `group_id`. A later event for the same id starts again from zero.
    pub fn forget(&self, item_id: ItemId, group_id: GroupId) -> Option<UsageRecord> {
        let removed = self.remove_record(group_id, item_id);
        self.owners.remove_if(&item_id, |_, owner| *owner == group_id);
        removed
    }

    fn remove_record(&self, group_id: GroupId, item_id: ItemId) -> Option<UsageRecord> {
        let (removed, now_empty) = {
            let mut table = self.groups.get_mut(&group_id)?;
            let removed = table.remove(&item_id);
            (removed, table.is_empty())
        };
        if now_empty {
            self.groups.remove_if(&group_id, |_, table| table.is_empty());
        }
        removed
    }

    /// Drop every record of a group. Returns the dropped item ids, sorted.
    pub fn drop_group(&self, group_id: GroupId) -> Vec<ItemId> {
        let Some((_, table)) = self.groups.remove(&group_id) else {
            return Vec::new();
        };
        let mut dropped: Vec<ItemId> = table.into_keys().collect();
        for item_id in &dropped {
            self.owners.remove_if(item_id, |_, owner| *owner == group_id);
        }
        dropped.sort();
        dropped
    }

    /// Current score, 0 when the item has no record in this group.
    pub fn score(&self, group_id: GroupId, item_id: ItemId) -> f64 {
        self.record(group_id, item_id).map(|r| r.score).unwrap_or(0.0)
    }

    pub fn record(&self, group_id: GroupId, item_id: ItemId) -> Option<UsageRecord> {
        self.groups
            .get(&group_id)
            .and_then(|table| table.get(&item_id).copied())
    }

    /// Copy of a group's usage table.
    pub fn usage(&self, group_id: GroupId) -> HashMap<ItemId, UsageRecord> {
        self.groups
            .get(&group_id)
            .map(|table| table.clone())
            .unwrap_or_default()
    }

    /// Group currently holding a record for `item_id`.
    pub fn owner_of(&self, item_id: ItemId) -> Option<GroupId> {
        self.owners.get(&item_id).map(|g| *g)
    }

    /// Number of groups with at least one record.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
