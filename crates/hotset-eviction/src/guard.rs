//! ModificationGuard — protected flags for items with in-progress interaction.
//!
//! Each load of an item opens a new load cycle. At most one interaction
//! observer is outstanding per cycle, and a signal from an older cycle is
//! ignored. A new load cycle clears the protected flag.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use hotset_core::models::{GroupId, ItemId};

#[derive(Debug, Clone, Copy, Default)]
struct GuardEntry {
    protected: bool,
    cycle: u64,
    observing: bool,
    /// Group the item was last seen loading in.
    group_id: Option<GroupId>,
}

/// Thread-safe per-item protection state.
pub struct ModificationGuard {
    entries: DashMap<ItemId, GuardEntry>,
    /// Cycle ids are global so a forgotten-then-reused item id never
    /// matches a stale observer.
    next_cycle: AtomicU64,
}

impl ModificationGuard {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_cycle: AtomicU64::new(1),
        }
    }

    /// The item started loading: open a new cycle and clear its flag.
    pub fn begin_load_cycle(&self, item_id: ItemId, group_id: GroupId) -> u64 {
        let cycle = self.next_cycle.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            item_id,
            GuardEntry {
                protected: false,
                cycle,
                observing: false,
                group_id: Some(group_id),
            },
        );
        cycle
    }

    /// Reserve the observer slot for the item's current cycle.
    ///
    /// Returns the cycle the observer belongs to, or `None` when the item is
    /// already protected or an observer is already outstanding.
    pub fn try_arm(&self, item_id: ItemId) -> Option<u64> {
        let mut entry = self.entries.entry(item_id).or_insert_with(|| GuardEntry {
            cycle: self.next_cycle.fetch_add(1, Ordering::Relaxed),
            ..GuardEntry::default()
        });
        if entry.protected || entry.observing {
            return None;
        }
        entry.observing = true;
        Some(entry.cycle)
    }

    /// An observer armed for `cycle` reported an interaction.
    /// Returns true when this set the flag.
    pub fn mark_modified(&self, item_id: ItemId, cycle: u64) -> bool {
        let Some(mut entry) = self.entries.get_mut(&item_id) else {
            return false;
        };
        if entry.cycle != cycle || entry.protected {
            return false;
        }
        entry.protected = true;
        entry.observing = false;
        true
    }

    /// A modification notification delivered without an observer token.
    /// Applies to whatever cycle is current.
    pub fn mark_modified_now(&self, item_id: ItemId) -> bool {
        let mut entry = self.entries.entry(item_id).or_insert_with(|| GuardEntry {
            cycle: self.next_cycle.fetch_add(1, Ordering::Relaxed),
            ..GuardEntry::default()
        });
        if entry.protected {
            return false;
        }
        entry.protected = true;
        entry.observing = false;
        true
    }

    /// The observer for `cycle` went away without reporting an interaction.
    pub fn observer_closed(&self, item_id: ItemId, cycle: u64) {
        if let Some(mut entry) = self.entries.get_mut(&item_id) {
            if entry.cycle == cycle {
                entry.observing = false;
            }
        }
    }

    pub fn is_protected(&self, item_id: ItemId) -> bool {
        self.entries
            .get(&item_id)
            .map(|entry| entry.protected)
            .unwrap_or(false)
    }

    /// Drop all state for an item that no longer exists.
    pub fn forget(&self, item_id: ItemId) -> bool {
        self.entries.remove(&item_id).is_some()
    }

    /// Drop the state of a closed group: every item last loaded in it, plus
    /// `items` known to belong to it. Returns how many entries went away.
    pub fn forget_group(&self, group_id: GroupId, items: &[ItemId]) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|item_id, entry| entry.group_id != Some(group_id) && !items.contains(item_id));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn protected_items(&self) -> Vec<ItemId> {
        let mut items: Vec<ItemId> = self
            .entries
            .iter()
            .filter(|entry| entry.protected)
            .map(|entry| *entry.key())
            .collect();
        items.sort();
        items
    }
}

impl Default for ModificationGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_interaction_protects() {
        let guard = ModificationGuard::new();
        let cycle = guard.try_arm(ItemId(1)).unwrap();
        assert!(!guard.is_protected(ItemId(1)));
        assert!(guard.mark_modified(ItemId(1), cycle));
        assert!(guard.is_protected(ItemId(1)));
        // One notification per cycle.
        assert!(!guard.mark_modified(ItemId(1), cycle));
    }

    #[test]
    fn only_one_observer_per_cycle() {
        let guard = ModificationGuard::new();
        assert!(guard.try_arm(ItemId(1)).is_some());
        assert!(guard.try_arm(ItemId(1)).is_none());
    }

    #[test]
    fn closed_observer_can_be_rearmed() {
        let guard = ModificationGuard::new();
        let cycle = guard.try_arm(ItemId(1)).unwrap();
        guard.observer_closed(ItemId(1), cycle);
        assert_eq!(guard.try_arm(ItemId(1)), Some(cycle));
    }

    #[test]
    fn new_load_cycle_clears_protection_and_ignores_stale_signal() {
        let guard = ModificationGuard::new();
        let old = guard.try_arm(ItemId(1)).unwrap();
        guard.mark_modified_now(ItemId(1));
        assert!(guard.is_protected(ItemId(1)));

        let new = guard.begin_load_cycle(ItemId(1), GroupId(1));
        assert_ne!(old, new);
        assert!(!guard.is_protected(ItemId(1)));
        assert!(!guard.mark_modified(ItemId(1), old));
        assert!(!guard.is_protected(ItemId(1)));
    }

    #[test]
    fn closing_a_group_forgets_its_items_only() {
        let guard = ModificationGuard::new();
        guard.begin_load_cycle(ItemId(1), GroupId(1));
        guard.begin_load_cycle(ItemId(2), GroupId(2));
        guard.mark_modified_now(ItemId(3));
        guard.mark_modified_now(ItemId(4));

        assert_eq!(guard.forget_group(GroupId(1), &[ItemId(3)]), 2);
        assert_eq!(guard.len(), 2);
        assert!(guard.is_protected(ItemId(4)));
        assert!(!guard.is_protected(ItemId(3)));
    }

    #[test]
    fn forgotten_item_ignores_late_signal() {
        let guard = ModificationGuard::new();
        let cycle = guard.try_arm(ItemId(1)).unwrap();
        assert!(guard.forget(ItemId(1)));
        assert!(!guard.mark_modified(ItemId(1), cycle));
        assert!(!guard.is_protected(ItemId(1)));
    }
}
