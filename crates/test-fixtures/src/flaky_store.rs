use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use hotset_core::errors::{HotsetResult, StoreError};
use hotset_core::traits::IKeyValueStore;

/// In-memory key-value store whose reads and writes can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Seed a value directly, bypassing failure injection.
    pub fn seed(&self, key: &str, value: serde_json::Value) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    /// Read a value directly, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<serde_json::Value> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl IKeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> HotsetResult<Option<serde_json::Value>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::ReadFailed {
                key: key.to_string(),
                reason: "injected read failure".to_string(),
            }
            .into());
        }
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> HotsetResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: "injected write failure".to_string(),
            }
            .into());
        }
        self.seed(key, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
