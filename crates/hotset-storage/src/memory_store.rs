use std::collections::HashMap;

use tokio::sync::RwLock;

use hotset_core::errors::HotsetResult;
use hotset_core::traits::IKeyValueStore;

/// Process-local key-value store. Contents do not survive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

impl IKeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> HotsetResult<Option<serde_json::Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> HotsetResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
