mod collaborator_error;
mod store_error;

pub use collaborator_error::CollaboratorError;
pub use store_error::StoreError;

use crate::models::GroupId;

/// Top-level engine error.
#[derive(Debug, thiserror::Error)]
pub enum HotsetError {
    #[error("resource manager error: {0}")]
    ResourceManager(#[from] CollaboratorError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("hot-set size must be a positive integer, got {value}")]
    InvalidTopN { value: i64 },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("reorder pass failed for group {group_id}: {reason}")]
    PassFailed { group_id: GroupId, reason: String },
}

pub type HotsetResult<T> = Result<T, HotsetError>;
