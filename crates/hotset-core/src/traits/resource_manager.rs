//! IResourceManager — the collaborator that owns, orders, and suspends items.

use std::future::Future;

use tokio::sync::oneshot;

use crate::errors::HotsetResult;
use crate::models::{GroupId, Item, ItemId};

/// One-shot signal resolved when the user first interacts with an item.
/// A dropped sender means the observer went away without an interaction.
pub type InteractionSignal = oneshot::Receiver<()>;

/// Resource manager collaborator.
///
/// Every call may yield; the engine never holds its own locks across them.
/// Per-item failures are returned as errors and handled by the caller.
pub trait IResourceManager: Send + Sync {
    /// All items of a group in their current visible order.
    fn query(&self, group_id: GroupId) -> impl Future<Output = HotsetResult<Vec<Item>>> + Send;

    /// Move an item to `index` within its group.
    fn reposition(
        &self,
        item_id: ItemId,
        index: usize,
    ) -> impl Future<Output = HotsetResult<()>> + Send;

    fn set_pinned(
        &self,
        item_id: ItemId,
        pinned: bool,
    ) -> impl Future<Output = HotsetResult<()>> + Send;

    /// Request that an item release its runtime footprint. The item stays in its group.
    fn suspend(&self, item_id: ItemId) -> impl Future<Output = HotsetResult<()>> + Send;

    /// Install a one-shot interaction observer for an item.
    fn subscribe_first_interaction(
        &self,
        item_id: ItemId,
    ) -> impl Future<Output = HotsetResult<InteractionSignal>> + Send;
}
