use serde::{Deserialize, Serialize};

use super::defaults;

/// Ranking subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Size of the hot set per group when the persisted `topN` setting is absent.
    pub top_n: usize,
    /// Pin the hot set (and unpin everything else) instead of only moving it.
    pub pin_mode: bool,
    /// Score added on each activation.
    pub activation_weight: f64,
    /// Score added when the active item finishes loading.
    pub load_complete_weight: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: defaults::DEFAULT_TOP_N,
            pin_mode: defaults::DEFAULT_PIN_MODE,
            activation_weight: defaults::DEFAULT_ACTIVATION_WEIGHT,
            load_complete_weight: defaults::DEFAULT_LOAD_COMPLETE_WEIGHT,
        }
    }
}
