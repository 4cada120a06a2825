//! SnapshotStore — per-group recall snapshots of the items outside the hot set.
//!
//! All groups share one persisted mapping. Writes are read-modify-write of
//! that mapping and are serialized so concurrent groups never drop each
//! other's entries.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use hotset_core::errors::{HotsetError, HotsetResult, StoreError};
use hotset_core::models::{GroupId, GroupSnapshot, Item, ItemId, SnapshotBook, SnapshotEntry};
use hotset_core::traits::IKeyValueStore;
use hotset_observability::tracing_setup::events;

pub struct SnapshotStore<S> {
    store: Arc<S>,
    key: String,
    write_lock: Mutex<()>,
}

impl<S: IKeyValueStore> SnapshotStore<S> {
    pub fn new(store: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the snapshot of `group_id` with every item of `all` not in `top`.
    ///
    /// `suspended_now` lists items suspended by the current pass; their
    /// entries are recorded as suspended even though `all` predates the sweep.
    pub async fn save(
        &self,
        group_id: GroupId,
        all: &[Item],
        top: &[ItemId],
        suspended_now: &[ItemId],
        now: DateTime<Utc>,
    ) -> HotsetResult<GroupSnapshot> {
        let top: HashSet<ItemId> = top.iter().copied().collect();
        let suspended_now: HashSet<ItemId> = suspended_now.iter().copied().collect();

        let items = all
            .iter()
            .filter(|item| !top.contains(&item.id))
            .map(|item| {
                let mut entry = SnapshotEntry::from(item);
                entry.group_id = group_id;
                entry.suspended |= suspended_now.contains(&item.id);
                entry
            })
            .collect();

        let snapshot = GroupSnapshot {
            group_id,
            updated_at: now,
            items,
        };

        let _guard = self.write_lock.lock().await;
        let mut book = self.read_book().await?;
        book.put(snapshot.clone());
        self.store
            .set(&self.key, serde_json::to_value(&book)?)
            .await?;

        events::snapshot_written(group_id, snapshot.items.len());
        Ok(snapshot)
    }

    /// The latest snapshot recorded for a group.
    pub async fn load(&self, group_id: GroupId) -> HotsetResult<Option<GroupSnapshot>> {
        Ok(self.read_book().await?.get(group_id).cloned())
    }

    pub async fn load_all(&self) -> HotsetResult<SnapshotBook> {
        self.read_book().await
    }

    /// Read the mapping. A stored value that does not decode, whether it is
    /// not JSON at all or JSON of the wrong shape, is treated as empty and
    /// will be overwritten by the next save. Failures to read abort.
    async fn read_book(&self) -> HotsetResult<SnapshotBook> {
        let value = match self.store.get(&self.key).await {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(SnapshotBook::default()),
            Err(HotsetError::Store(StoreError::CorruptValue { details, .. })) => {
                self.warn_unreadable(&details);
                return Ok(SnapshotBook::default());
            }
            Err(e) => return Err(e),
        };
        match serde_json::from_value(value) {
            Ok(book) => Ok(book),
            Err(e) => {
                self.warn_unreadable(&e.to_string());
                Ok(SnapshotBook::default())
            }
        }
    }

    fn warn_unreadable(&self, error: &str) {
        tracing::warn!(
            key = %self.key,
            error,
            "snapshot mapping unreadable, starting fresh"
        );
    }
}
