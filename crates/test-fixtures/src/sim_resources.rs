//! SimResourceManager — an in-memory resource manager with failure injection.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

use hotset_core::errors::{CollaboratorError, HotsetResult};
use hotset_core::models::{GroupId, Item, ItemId};
use hotset_core::traits::{IResourceManager, InteractionSignal};

/// Operations that can be made to fail for a specific item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimOp {
    Reposition,
    SetPinned,
    Suspend,
    Subscribe,
}

/// A call received by the simulator, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCall {
    Query(GroupId),
    Reposition(ItemId, usize),
    SetPinned(ItemId, bool),
    Suspend(ItemId),
    Subscribe(ItemId),
}

#[derive(Default)]
struct SimState {
    groups: BTreeMap<GroupId, Vec<Item>>,
    failures: HashMap<(SimOp, ItemId), String>,
    unavailable_groups: HashSet<GroupId>,
    observers: HashMap<ItemId, oneshot::Sender<()>>,
    calls: Vec<SimCall>,
}

impl SimState {
    fn locate(&self, item_id: ItemId) -> Option<(GroupId, usize)> {
        self.groups.iter().find_map(|(group_id, items)| {
            items
                .iter()
                .position(|item| item.id == item_id)
                .map(|index| (*group_id, index))
        })
    }

    fn item_mut(&mut self, item_id: ItemId) -> Option<&mut Item> {
        self.groups
            .values_mut()
            .flat_map(|items| items.iter_mut())
            .find(|item| item.id == item_id)
    }

    fn check(&self, op: SimOp, item_id: ItemId) -> HotsetResult<()> {
        match self.failures.get(&(op, item_id)) {
            Some(reason) => Err(CollaboratorError::Rejected {
                operation: format!("{op:?}").to_lowercase(),
                item_id,
                reason: reason.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Ordered groups of items behind the `IResourceManager` interface.
pub struct SimResourceManager {
    state: Mutex<SimState>,
    latency: Duration,
}

impl SimResourceManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState::default()),
            latency: Duration::ZERO,
        }
    }

    /// Every operation sleeps this long (tokio time) before taking effect.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Replace a group's contents. Items are re-homed to `group_id`.
    pub fn set_group(&self, group_id: GroupId, items: Vec<Item>) {
        let items = items
            .into_iter()
            .map(|mut item| {
                item.group_id = group_id;
                item
            })
            .collect();
        self.lock().groups.insert(group_id, items);
    }

    /// Remove an item from wherever it lives.
    pub fn remove_item(&self, item_id: ItemId) -> Option<Item> {
        let mut state = self.lock();
        let (group_id, index) = state.locate(item_id)?;
        state.observers.remove(&item_id);
        state.groups.get_mut(&group_id).map(|items| items.remove(index))
    }

    /// Move an item to the end of another group.
    pub fn move_item(&self, item_id: ItemId, to: GroupId) -> bool {
        let mut state = self.lock();
        let Some((from, index)) = state.locate(item_id) else {
            return false;
        };
        let Some(mut item) = state.groups.get_mut(&from).map(|items| items.remove(index)) else {
            return false;
        };
        item.group_id = to;
        state.groups.entry(to).or_default().push(item);
        true
    }

    pub fn close_group(&self, group_id: GroupId) -> Vec<Item> {
        self.lock().groups.remove(&group_id).unwrap_or_default()
    }

    /// The item is back in use; clears its suspended state.
    pub fn resume(&self, item_id: ItemId) {
        if let Some(item) = self.lock().item_mut(item_id) {
            item.suspended = false;
        }
    }

    pub fn items(&self, group_id: GroupId) -> Vec<Item> {
        self.lock().groups.get(&group_id).cloned().unwrap_or_default()
    }

    /// Visible order of a group.
    pub fn order(&self, group_id: GroupId) -> Vec<u64> {
        self.items(group_id).iter().map(|item| item.id.0).collect()
    }

    pub fn item(&self, item_id: ItemId) -> Option<Item> {
        let state = self.lock();
        let (group_id, index) = state.locate(item_id)?;
        state.groups.get(&group_id).map(|items| items[index].clone())
    }

    pub fn fail(&self, op: SimOp, item_id: ItemId, reason: &str) {
        self.lock().failures.insert((op, item_id), reason.to_string());
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Make queries for a group fail, or succeed again.
    pub fn set_unavailable(&self, group_id: GroupId, unavailable: bool) {
        let mut state = self.lock();
        if unavailable {
            state.unavailable_groups.insert(group_id);
        } else {
            state.unavailable_groups.remove(&group_id);
        }
    }

    pub fn calls(&self) -> Vec<SimCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn query_count(&self, group_id: GroupId) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| **call == SimCall::Query(group_id))
            .count()
    }

    pub fn suspend_calls(&self) -> Vec<u64> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                SimCall::Suspend(id) => Some(id.0),
                _ => None,
            })
            .collect()
    }

    pub fn has_observer(&self, item_id: ItemId) -> bool {
        self.lock().observers.contains_key(&item_id)
    }

    /// Simulate the user's first interaction with an item. Returns false
    /// if no observer was installed.
    pub fn interact(&self, item_id: ItemId) -> bool {
        match self.lock().observers.remove(&item_id) {
            Some(sender) => sender.send(()).is_ok(),
            None => false,
        }
    }

    /// Tear down an observer without an interaction (e.g. navigation).
    pub fn drop_observer(&self, item_id: ItemId) -> bool {
        self.lock().observers.remove(&item_id).is_some()
    }
}

impl Default for SimResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl IResourceManager for SimResourceManager {
    async fn query(&self, group_id: GroupId) -> HotsetResult<Vec<Item>> {
        self.pause().await;
        let mut state = self.lock();
        state.calls.push(SimCall::Query(group_id));
        if state.unavailable_groups.contains(&group_id) {
            return Err(CollaboratorError::GroupUnavailable {
                group_id,
                reason: "simulated outage".to_string(),
            }
            .into());
        }
        Ok(state.groups.get(&group_id).cloned().unwrap_or_default())
    }

    async fn reposition(&self, item_id: ItemId, index: usize) -> HotsetResult<()> {
        self.pause().await;
        let mut state = self.lock();
        state.calls.push(SimCall::Reposition(item_id, index));
        state.check(SimOp::Reposition, item_id)?;
        let (group_id, from) = state
            .locate(item_id)
            .ok_or(CollaboratorError::ItemNotFound { item_id })?;
        if let Some(items) = state.groups.get_mut(&group_id) {
            let item = items.remove(from);
            let to = index.min(items.len());
            items.insert(to, item);
        }
        Ok(())
    }

    async fn set_pinned(&self, item_id: ItemId, pinned: bool) -> HotsetResult<()> {
        self.pause().await;
        let mut state = self.lock();
        state.calls.push(SimCall::SetPinned(item_id, pinned));
        state.check(SimOp::SetPinned, item_id)?;
        let item = state
            .item_mut(item_id)
            .ok_or(CollaboratorError::ItemNotFound { item_id })?;
        item.pinned = pinned;
        Ok(())
    }

    async fn suspend(&self, item_id: ItemId) -> HotsetResult<()> {
        self.pause().await;
        let mut state = self.lock();
        state.calls.push(SimCall::Suspend(item_id));
        state.check(SimOp::Suspend, item_id)?;
        let item = state
            .item_mut(item_id)
            .ok_or(CollaboratorError::ItemNotFound { item_id })?;
        item.suspended = true;
        Ok(())
    }

    async fn subscribe_first_interaction(&self, item_id: ItemId) -> HotsetResult<InteractionSignal> {
        self.pause().await;
        let mut state = self.lock();
        state.calls.push(SimCall::Subscribe(item_id));
        if let Some(reason) = state.failures.get(&(SimOp::Subscribe, item_id)) {
            return Err(CollaboratorError::SubscriptionFailed {
                item_id,
                reason: reason.clone(),
            }
            .into());
        }
        let (sender, receiver) = oneshot::channel();
        state.observers.insert(item_id, sender);
        Ok(receiver)
    }
}
