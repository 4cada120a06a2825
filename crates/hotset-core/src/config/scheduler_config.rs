use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Debounce scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Quiet period after the last triggering event before a reorder pass runs.
    pub debounce_ms: u64,
}

impl SchedulerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: defaults::DEFAULT_DEBOUNCE_MS,
        }
    }
}
