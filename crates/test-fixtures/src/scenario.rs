use serde::Deserialize;

use hotset_core::models::Item;

/// One item of a ranking scenario, listed in enumeration order.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioItem {
    pub id: u64,
    pub title: String,
    pub url: String,
    /// Number of activation events to replay.
    #[serde(default)]
    pub activations: u32,
    /// Number of load completions (while active) to replay.
    #[serde(default)]
    pub loads: u32,
    #[serde(default)]
    pub pinned: bool,
}

/// A group, the activity to replay into it, and the expected hot set.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingScenario {
    pub name: String,
    pub group_id: u64,
    pub top_n: usize,
    pub items: Vec<ScenarioItem>,
    pub expected_top: Vec<u64>,
}

impl RankingScenario {
    pub fn group_items(&self) -> Vec<Item> {
        self.items
            .iter()
            .map(|s| {
                let item = Item::new(s.id, self.group_id, &s.title, &s.url);
                if s.pinned {
                    item.pinned()
                } else {
                    item
                }
            })
            .collect()
    }

    /// Ids expected outside the hot set, in enumeration order.
    pub fn expected_complement(&self) -> Vec<u64> {
        self.items
            .iter()
            .map(|s| s.id)
            .filter(|id| !self.expected_top.contains(id))
            .collect()
    }
}
