use serde::{Deserialize, Serialize};

use super::defaults;

/// Eviction subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvictionConfig {
    /// Idle time after which a non-hot item is suspended.
    pub inactivity_threshold_secs: u64,
    /// Global override: never suspend anything.
    pub never_suspend_active_work: bool,
}

impl EvictionConfig {
    pub fn inactivity_threshold(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.inactivity_threshold_secs as i64)
    }
}

impl Default for EvictionConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold_secs: defaults::DEFAULT_INACTIVITY_THRESHOLD_SECS,
            never_suspend_active_work: defaults::DEFAULT_NEVER_SUSPEND_ACTIVE_WORK,
        }
    }
}
