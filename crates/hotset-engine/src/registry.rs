//! GroupRegistry — per-group pass state.
//!
//! A group has an entry only while a pass for it is in flight. A pass that
//! is requested meanwhile marks the entry dirty instead of running; the
//! finishing pass sees the mark and schedules a follow-up.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use hotset_core::models::GroupId;

#[derive(Debug, Clone, Copy, Default)]
struct PassState {
    dirty: bool,
}

#[derive(Debug, Default)]
pub struct GroupRegistry {
    in_flight: DashMap<GroupId, PassState>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the group for a pass. Returns false, and marks the group dirty,
    /// when another pass already holds it.
    pub fn try_begin(&self, group_id: GroupId) -> bool {
        match self.in_flight.entry(group_id) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().dirty = true;
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(PassState::default());
                true
            }
        }
    }

    /// Release the group. Returns true when a pass was requested while it
    /// was held.
    pub fn finish(&self, group_id: GroupId) -> bool {
        self.in_flight
            .remove(&group_id)
            .map(|(_, state)| state.dirty)
            .unwrap_or(false)
    }

    /// Drop any follow-up requested for a group. A pass still running for
    /// it keeps the claim until it finishes, so a reused group id cannot
    /// start a second pass alongside it.
    pub fn cancel_follow_up(&self, group_id: GroupId) {
        if let Some(mut state) = self.in_flight.get_mut(&group_id) {
            state.dirty = false;
        }
    }

    pub fn is_busy(&self, group_id: GroupId) -> bool {
        self.in_flight.contains_key(&group_id)
    }

    pub fn busy_count(&self) -> usize {
        self.in_flight.len()
    }
}
