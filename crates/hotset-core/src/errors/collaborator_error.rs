use crate::models::{GroupId, ItemId};

/// Failures reported by the resource manager collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("item not found: {item_id}")]
    ItemNotFound { item_id: ItemId },

    #[error("{operation} rejected for item {item_id}: {reason}")]
    Rejected {
        operation: String,
        item_id: ItemId,
        reason: String,
    },

    #[error("group {group_id} unavailable: {reason}")]
    GroupUnavailable { group_id: GroupId, reason: String },

    #[error("interaction subscription failed for item {item_id}: {reason}")]
    SubscriptionFailed { item_id: ItemId, reason: String },
}
