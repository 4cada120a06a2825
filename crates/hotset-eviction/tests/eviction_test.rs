//! Sweep behaviour against the simulated resource manager.

use std::collections::HashMap;

use chrono::Duration;

use hotset_core::models::{FailedOperation, GroupId, Item, ItemId, UsageRecord};
use hotset_core::traits::IClock;
use hotset_eviction::{EvictionManager, EvictionPolicy, EvictionReason, ModificationGuard};
use test_fixtures::{ManualClock, SimOp, SimResourceManager};

const GROUP: GroupId = GroupId(1);

fn group(ids: &[u64]) -> Vec<Item> {
    ids.iter()
        .map(|id| Item::new(*id, GROUP.0, format!("item {id}"), format!("https://example.test/{id}")))
        .collect()
}

fn manager(threshold_secs: i64) -> EvictionManager {
    EvictionManager::new(EvictionPolicy::new(Duration::seconds(threshold_secs), false))
}

// ── Idle selection ───────────────────────────────────────────────────────

#[tokio::test]
async fn suspends_only_items_idle_past_threshold() {
    let clock = ManualClock::fixed();
    let sim = SimResourceManager::new();
    let items = group(&[1, 2, 3]);
    sim.set_group(GROUP, items.clone());

    let mut usage = HashMap::new();
    usage.insert(ItemId(1), UsageRecord::new(clock.now()));
    clock.advance(Duration::seconds(700));
    usage.insert(ItemId(2), UsageRecord::new(clock.now()));
    clock.advance(Duration::seconds(10));

    let guard = ModificationGuard::new();
    let report = manager(600)
        .sweep(&sim, GROUP, &items, &usage, &guard, clock.now())
        .await;

    // Item 3 has no record and counts as idle since the epoch.
    assert_eq!(report.suspended, vec![ItemId(1), ItemId(3)]);
    assert!(report.failures.is_empty());
    assert_eq!(sim.suspend_calls(), vec![1, 3]);
    assert!(sim.item(ItemId(1)).unwrap().suspended);
    assert!(!sim.item(ItemId(2)).unwrap().suspended);
}

#[tokio::test]
async fn idle_exactly_at_threshold_is_kept() {
    let clock = ManualClock::fixed();
    let sim = SimResourceManager::new();
    let items = group(&[1]);
    sim.set_group(GROUP, items.clone());

    let mut usage = HashMap::new();
    usage.insert(ItemId(1), UsageRecord::new(clock.now()));
    clock.advance(Duration::seconds(600));

    let report = manager(600)
        .sweep(&sim, GROUP, &items, &usage, &ModificationGuard::new(), clock.now())
        .await;

    assert!(report.suspended.is_empty());
    assert_eq!(report.decisions[0].reason, EvictionReason::Recent);
}

// ── Exemptions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn protected_items_are_never_suspended() {
    let clock = ManualClock::fixed();
    let sim = SimResourceManager::new();
    let items = group(&[1, 2]);
    sim.set_group(GROUP, items.clone());

    let guard = ModificationGuard::new();
    let cycle = guard.begin_load_cycle(ItemId(1), GROUP);
    assert!(guard.try_arm(ItemId(1)).is_some());
    assert!(guard.mark_modified(ItemId(1), cycle));

    clock.advance(Duration::hours(2));
    let report = manager(600)
        .sweep(&sim, GROUP, &items, &HashMap::new(), &guard, clock.now())
        .await;

    assert_eq!(report.protected_skipped, vec![ItemId(1)]);
    assert_eq!(report.suspended, vec![ItemId(2)]);
    assert_eq!(sim.suspend_calls(), vec![2]);
}

#[tokio::test]
async fn override_disables_all_suspension() {
    let clock = ManualClock::fixed();
    let sim = SimResourceManager::new();
    let items = group(&[1, 2, 3]);
    sim.set_group(GROUP, items.clone());

    let never = EvictionManager::new(EvictionPolicy::new(Duration::seconds(1), true));
    let report = never
        .sweep(&sim, GROUP, &items, &HashMap::new(), &ModificationGuard::new(), clock.now())
        .await;

    assert!(report.suspended.is_empty());
    assert!(sim.suspend_calls().is_empty());
    assert!(report
        .decisions
        .iter()
        .all(|d| d.reason == EvictionReason::Override));
}

#[tokio::test]
async fn already_suspended_items_are_not_requested_again() {
    let clock = ManualClock::fixed();
    let sim = SimResourceManager::new();
    let items = vec![
        Item::new(1, GROUP.0, "a", "https://a.test").suspended(),
        Item::new(2, GROUP.0, "b", "https://b.test"),
    ];
    sim.set_group(GROUP, items.clone());

    let report = manager(600)
        .sweep(&sim, GROUP, &items, &HashMap::new(), &ModificationGuard::new(), clock.now())
        .await;

    assert_eq!(report.suspended, vec![ItemId(2)]);
    assert_eq!(sim.suspend_calls(), vec![2]);
}

// ── Failure isolation ────────────────────────────────────────────────────

#[tokio::test]
async fn refused_suspend_does_not_stop_the_sweep() {
    let clock = ManualClock::fixed();
    let sim = SimResourceManager::new();
    let items = group(&[1, 2, 3]);
    sim.set_group(GROUP, items.clone());
    sim.fail(SimOp::Suspend, ItemId(2), "media playing");

    let report = manager(600)
        .sweep(&sim, GROUP, &items, &HashMap::new(), &ModificationGuard::new(), clock.now())
        .await;

    assert_eq!(report.suspended, vec![ItemId(1), ItemId(3)]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].item_id, ItemId(2));
    assert_eq!(report.failures[0].operation, FailedOperation::Suspend);
    assert!(report.failures[0].reason.contains("media playing"));
    assert_eq!(sim.suspend_calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn empty_candidate_list_does_nothing() {
    let clock = ManualClock::fixed();
    let sim = SimResourceManager::new();

    let report = manager(600)
        .sweep(&sim, GROUP, &[], &HashMap::new(), &ModificationGuard::new(), clock.now())
        .await;

    assert_eq!(report, Default::default());
    assert!(sim.calls().is_empty());
}
