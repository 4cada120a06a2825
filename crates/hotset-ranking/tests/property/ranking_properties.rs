use std::collections::HashMap;

use chrono::Utc;
use hotset_core::config::RankingConfig;
use hotset_core::models::{GroupId, Item, ItemId, UsageRecord};
use hotset_ranking::{PrioritizationEngine, ScoreTracker};
use proptest::prelude::*;

fn make_group(scores: &[u8]) -> (Vec<Item>, HashMap<ItemId, UsageRecord>) {
    let now = Utc::now();
    let items = (0..scores.len() as u64)
        .map(|id| Item::new(id, 1, "t", "u"))
        .collect();
    let usage = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            (
                ItemId(i as u64),
                UsageRecord {
                    score: s as f64 * 0.5,
                    last_used: now,
                },
            )
        })
        .collect();
    (items, usage)
}

proptest! {
    #[test]
    fn top_n_is_sorted_and_ties_keep_enumeration_order(
        scores in prop::collection::vec(0u8..6, 0..40),
        n in 1usize..12,
    ) {
        let (items, usage) = make_group(&scores);
        let top = PrioritizationEngine::new(false).top_n(&items, &usage, n);

        prop_assert_eq!(top.len(), n.min(items.len()));
        for pair in top.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].item.id < pair[1].item.id);
            }
        }
    }

    #[test]
    fn nothing_outside_top_n_outscores_it(
        scores in prop::collection::vec(0u8..10, 1..30),
        n in 1usize..10,
    ) {
        let (items, usage) = make_group(&scores);
        let top = PrioritizationEngine::new(false).top_n(&items, &usage, n);
        let min_top = top.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);
        let top_ids: Vec<ItemId> = top.iter().map(|r| r.item.id).collect();

        for item in &items {
            if !top_ids.contains(&item.id) {
                let score = usage.get(&item.id).map(|r| r.score).unwrap_or(0.0);
                prop_assert!(score <= min_top);
            }
        }
    }

    #[test]
    fn score_accumulates_exactly(activations in 0u32..50, loads in 0u32..50) {
        let tracker = ScoreTracker::new(&RankingConfig::default());
        let now = Utc::now();
        for _ in 0..activations {
            tracker.record_activation(ItemId(1), GroupId(1), now);
        }
        for _ in 0..loads {
            tracker.record_load_completed(ItemId(1), GroupId(1), now);
        }
        let expected = activations as f64 + loads as f64 * 0.5;
        prop_assert_eq!(tracker.score(GroupId(1), ItemId(1)), expected);
    }
}
