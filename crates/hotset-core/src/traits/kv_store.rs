use std::future::Future;

use crate::errors::HotsetResult;

/// Persistent key-value store holding settings and snapshots as JSON values.
pub trait IKeyValueStore: Send + Sync {
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = HotsetResult<Option<serde_json::Value>>> + Send;

    /// Replace the value stored under `key`.
    fn set(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> impl Future<Output = HotsetResult<()>> + Send;
}
