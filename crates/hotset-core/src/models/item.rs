use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an item, unique across the resource manager's universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// Identity of an independent ranking group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An addressable session resource as reported by the resource manager.
///
/// Owned by the resource manager; the engine only holds copies taken at
/// query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub group_id: GroupId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub suspended: bool,
}

impl Item {
    pub fn new(id: u64, group_id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            group_id: GroupId(group_id),
            title: title.into(),
            url: url.into(),
            pinned: false,
            suspended: false,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn suspended(mut self) -> Self {
        self.suspended = true;
        self
    }
}
