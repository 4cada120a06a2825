use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{GroupId, Item, ItemId};

/// Lightweight record of a snoozable item, kept for later recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub id: ItemId,
    pub title: String,
    pub url: String,
    pub group_id: GroupId,
    pub suspended: bool,
}

impl From<&Item> for SnapshotEntry {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            url: item.url.clone(),
            group_id: item.group_id,
            suspended: item.suspended,
        }
    }
}

/// The non-hot items of one group as of the last reorder pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub group_id: GroupId,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<SnapshotEntry>,
}

/// Persisted mapping of group id to that group's latest snapshot.
///
/// Keys are decimal group ids so the stored JSON is a plain object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotBook {
    pub groups: BTreeMap<String, GroupSnapshot>,
}

impl SnapshotBook {
    pub fn get(&self, group_id: GroupId) -> Option<&GroupSnapshot> {
        self.groups.get(&group_id.to_string())
    }

    /// Replace the entry for the snapshot's group, leaving other groups untouched.
    pub fn put(&mut self, snapshot: GroupSnapshot) -> Option<GroupSnapshot> {
        self.groups.insert(snapshot.group_id.to_string(), snapshot)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
