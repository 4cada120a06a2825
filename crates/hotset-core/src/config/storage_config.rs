use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Key under which the per-group snapshot mapping is stored.
    pub snapshot_key: String,
    /// Key of the persisted hot-set size setting.
    pub top_n_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            snapshot_key: defaults::DEFAULT_SNAPSHOT_KEY.to_string(),
            top_n_key: defaults::DEFAULT_TOP_N_KEY.to_string(),
        }
    }
}
