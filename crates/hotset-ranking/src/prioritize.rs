//! PrioritizationEngine — deterministic top-N selection.
//!
//! Items are ordered by score, descending. Ties keep the order in which the
//! resource manager enumerated them, so identical input always yields an
//! identical hot set.

use std::collections::HashMap;

use hotset_core::config::RankingConfig;
use hotset_core::models::{Item, ItemId, UsageRecord};

/// An item paired with the score it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    pub item: Item,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrioritizationEngine {
    /// Rank pinned items too. Only the pin-management mode does this.
    include_pinned: bool,
}

impl PrioritizationEngine {
    pub fn new(include_pinned: bool) -> Self {
        Self { include_pinned }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.pin_mode)
    }

    /// Whether an item takes part in ranking (and therefore eviction).
    pub fn is_eligible(&self, item: &Item) -> bool {
        self.include_pinned || !item.pinned
    }

    /// Every eligible item in rank order. Missing records score 0.
    pub fn rank(&self, items: &[Item], usage: &HashMap<ItemId, UsageRecord>) -> Vec<RankedItem> {
        let mut ranked: Vec<RankedItem> = items
            .iter()
            .filter(|item| self.is_eligible(item))
            .map(|item| RankedItem {
                score: usage.get(&item.id).map(|r| r.score).unwrap_or(0.0),
                item: item.clone(),
            })
            .collect();
        // sort_by is stable: equal scores keep enumeration order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// The first `n` items of [`rank`](Self::rank).
    pub fn top_n(
        &self,
        items: &[Item],
        usage: &HashMap<ItemId, UsageRecord>,
        n: usize,
    ) -> Vec<RankedItem> {
        let mut ranked = self.rank(items, usage);
        ranked.truncate(n);
        ranked
    }
}
