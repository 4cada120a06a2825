//! EvictionPolicy — which items outside the hot set may be suspended.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use hotset_core::config::EvictionConfig;
use hotset_core::models::{Item, ItemId};

/// Why an item was or wasn't suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionReason {
    /// Idle beyond the inactivity threshold.
    Idle,
    /// Used within the threshold.
    Recent,
    Protected,
    AlreadySuspended,
    /// Suspension disabled globally.
    Override,
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EvictionReason::Idle => "idle beyond threshold",
            EvictionReason::Recent => "recently used",
            EvictionReason::Protected => "protected by interaction",
            EvictionReason::AlreadySuspended => "already suspended",
            EvictionReason::Override => "suspension disabled",
        };
        f.write_str(text)
    }
}

/// Suspend/skip decision for one item, kept for audit logging.
#[derive(Debug, Clone, PartialEq)]
pub struct EvictionDecision {
    pub item_id: ItemId,
    pub should_suspend: bool,
    pub idle_for: Duration,
    pub reason: EvictionReason,
}

#[derive(Debug, Clone, Copy)]
pub struct EvictionPolicy {
    threshold: Duration,
    never_suspend: bool,
}

impl EvictionPolicy {
    pub fn new(threshold: Duration, never_suspend: bool) -> Self {
        Self {
            threshold,
            never_suspend,
        }
    }

    pub fn from_config(config: &EvictionConfig) -> Self {
        Self::new(
            config.inactivity_threshold(),
            config.never_suspend_active_work,
        )
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Decide for a non-hot item. `last_used` is `None` when the item has no
    /// usage record, which counts as idle since the epoch.
    pub fn evaluate(
        &self,
        item: &Item,
        last_used: Option<DateTime<Utc>>,
        protected: bool,
        now: DateTime<Utc>,
    ) -> EvictionDecision {
        // DateTime<Utc>::default() is the Unix epoch.
        let idle_for = now - last_used.unwrap_or_default();

        let reason = if protected {
            EvictionReason::Protected
        } else if self.never_suspend {
            EvictionReason::Override
        } else if item.suspended {
            EvictionReason::AlreadySuspended
        } else if idle_for > self.threshold {
            EvictionReason::Idle
        } else {
            EvictionReason::Recent
        };

        EvictionDecision {
            item_id: item.id,
            should_suspend: reason == EvictionReason::Idle,
            idle_for,
            reason,
        }
    }
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self::from_config(&EvictionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> EvictionPolicy {
        EvictionPolicy::new(Duration::minutes(10), false)
    }

    #[test]
    fn idle_beyond_threshold_is_suspended() {
        let now = Utc::now();
        let item = Item::new(1, 1, "a", "b");
        let decision = policy().evaluate(&item, Some(now - Duration::minutes(11)), false, now);
        assert!(decision.should_suspend);
        assert_eq!(decision.reason, EvictionReason::Idle);
        assert_eq!(decision.idle_for, Duration::minutes(11));
    }

    #[test]
    fn exactly_at_threshold_is_kept() {
        let now = Utc::now();
        let item = Item::new(1, 1, "a", "b");
        let decision = policy().evaluate(&item, Some(now - Duration::minutes(10)), false, now);
        assert!(!decision.should_suspend);
        assert_eq!(decision.reason, EvictionReason::Recent);
    }

    #[test]
    fn missing_record_is_maximally_idle() {
        let now = Utc::now();
        let item = Item::new(1, 1, "a", "b");
        let decision = policy().evaluate(&item, None, false, now);
        assert!(decision.should_suspend);
        assert!(decision.idle_for > Duration::days(365 * 50));
    }

    #[test]
    fn protection_wins_over_idleness() {
        let now = Utc::now();
        let item = Item::new(1, 1, "a", "b");
        let decision = policy().evaluate(&item, None, true, now);
        assert!(!decision.should_suspend);
        assert_eq!(decision.reason, EvictionReason::Protected);
    }

    #[test]
    fn global_override_disables_suspension() {
        let now = Utc::now();
        let item = Item::new(1, 1, "a", "b");
        let decision = EvictionPolicy::new(Duration::minutes(10), true).evaluate(&item, None, false, now);
        assert!(!decision.should_suspend);
        assert_eq!(decision.reason, EvictionReason::Override);
    }

    #[test]
    fn already_suspended_items_are_not_resuspended() {
        let now = Utc::now();
        let item = Item::new(1, 1, "a", "b").suspended();
        let decision = policy().evaluate(&item, None, false, now);
        assert!(!decision.should_suspend);
        assert_eq!(decision.reason.to_string(), "already suspended");
    }
}
