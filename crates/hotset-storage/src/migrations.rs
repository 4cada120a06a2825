//! Schema for the key-value table. Every statement is idempotent.

use rusqlite::Connection;

use hotset_core::errors::HotsetResult;

use crate::to_store_err;

/// Current schema version, recorded in `user_version`.
pub const SCHEMA_VERSION: u32 = 1;

pub fn run_migrations(conn: &Connection) -> HotsetResult<()> {
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_store_err(e.to_string()))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        PRAGMA user_version = 1;
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;

    tracing::debug!(from = version, to = SCHEMA_VERSION, "storage schema migrated");
    Ok(())
}
