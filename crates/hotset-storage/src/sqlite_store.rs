//! SqliteStore — JSON values in a single SQLite table.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use hotset_core::errors::{HotsetResult, StoreError};
use hotset_core::traits::IKeyValueStore;

use crate::migrations;
use crate::to_store_err;

/// Key-value store backed by SQLite. All access goes through one
/// connection behind an async mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and apply the schema.
    pub fn open(path: &Path) -> HotsetResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_store_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Self::initialize(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> HotsetResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_store_err(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> HotsetResult<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Every stored key, sorted.
    pub async fn keys(&self) -> HotsetResult<Vec<String>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT key FROM kv ORDER BY key")
            .map_err(|e| to_store_err(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| to_store_err(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| to_store_err(e.to_string()))
    }
}

fn apply_pragmas(conn: &Connection) -> HotsetResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))
}

impl IKeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> HotsetResult<Option<serde_json::Value>> {
        let conn = self.conn.lock().await;
        let raw: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| StoreError::ReadFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        match raw {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| {
                    StoreError::CorruptValue {
                        key: key.to_string(),
                        details: e.to_string(),
                    }
                    .into()
                }),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> HotsetResult<()> {
        let text = serde_json::to_string(&value)?;
        let now = chrono::Utc::now().to_rfc3339();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, text, now],
        )
        .map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
