// Single source of truth for all default values.

// --- Ranking ---
pub const DEFAULT_TOP_N: usize = 6;
pub const DEFAULT_PIN_MODE: bool = false;
pub const DEFAULT_ACTIVATION_WEIGHT: f64 = 1.0;
pub const DEFAULT_LOAD_COMPLETE_WEIGHT: f64 = 0.5;

// --- Scheduler ---
pub const DEFAULT_DEBOUNCE_MS: u64 = 1_200;

// --- Eviction ---
pub const DEFAULT_INACTIVITY_THRESHOLD_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_NEVER_SUSPEND_ACTIVE_WORK: bool = false;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "hotset.db";
pub const DEFAULT_SNAPSHOT_KEY: &str = "snapshots";
pub const DEFAULT_TOP_N_KEY: &str = "topN";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
