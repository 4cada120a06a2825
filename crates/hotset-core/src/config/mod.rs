//! Engine configuration, loaded from TOML with per-section defaults.

pub mod defaults;
mod eviction_config;
mod observability_config;
mod ranking_config;
mod scheduler_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use eviction_config::EvictionConfig;
pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingConfig;
pub use scheduler_config::SchedulerConfig;
pub use storage_config::StorageConfig;

use crate::errors::{HotsetError, HotsetResult};

/// Top-level configuration. Every section falls back to its defaults when
/// omitted, so an empty document is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HotsetConfig {
    pub ranking: RankingConfig,
    pub scheduler: SchedulerConfig,
    pub eviction: EvictionConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl HotsetConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> HotsetResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| HotsetError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: &Path) -> HotsetResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| HotsetError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&source)
    }

    /// Reject values the engine cannot operate with.
    pub fn validate(&self) -> HotsetResult<()> {
        if self.ranking.top_n == 0 {
            return Err(HotsetError::InvalidTopN { value: 0 });
        }
        for (name, weight) in [
            ("ranking.activation_weight", self.ranking.activation_weight),
            ("ranking.load_complete_weight", self.ranking.load_complete_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(HotsetError::ConfigError {
                    reason: format!("{name} must be a finite non-negative number, got {weight}"),
                });
            }
        }
        if self.scheduler.debounce_ms == 0 {
            return Err(HotsetError::ConfigError {
                reason: "scheduler.debounce_ms must be positive".to_string(),
            });
        }
        Ok(())
    }
}
