//! HotsetEngine — the entry point collaborators talk to.
//!
//! Event handlers update usage state and arm the group's debounce timer;
//! they never rank or reorder synchronously. The reorder pass runs from
//! the timer, or immediately on a manual trigger.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hotset_core::config::HotsetConfig;
use hotset_core::constants::VERSION;
use hotset_core::errors::HotsetResult;
use hotset_core::models::{GroupId, GroupSnapshot, ItemId, PassOutcome, SnapshotBook};
use hotset_core::traits::{IClock, IKeyValueStore, IResourceManager, SystemClock};
use hotset_eviction::{EvictionManager, EvictionPolicy, ModificationGuard};
use hotset_observability::tracing_setup::events;
use hotset_observability::EngineMetrics;
use hotset_ranking::{PrioritizationEngine, RankedItem, ScoreTracker};
use hotset_scheduler::{DebounceScheduler, TimerToken};
use hotset_storage::{read_top_n, SnapshotStore};

use crate::registry::GroupRegistry;

/// Usage-ranked hot-set engine over a resource manager `R` and a
/// persistent store `S`.
///
/// Always used behind an `Arc`: timers and interaction observers outlive
/// the call that created them.
pub struct HotsetEngine<R, S> {
    pub(crate) resources: Arc<R>,
    pub(crate) store: Arc<S>,
    pub(crate) clock: Arc<dyn IClock>,
    pub(crate) config: HotsetConfig,
    pub(crate) tracker: ScoreTracker,
    pub(crate) prioritizer: PrioritizationEngine,
    pub(crate) guard: Arc<ModificationGuard>,
    pub(crate) eviction: EvictionManager,
    pub(crate) snapshots: SnapshotStore<S>,
    pub(crate) scheduler: DebounceScheduler,
    pub(crate) registry: GroupRegistry,
    pub(crate) metrics: Arc<Mutex<EngineMetrics>>,
}

impl<R, S> HotsetEngine<R, S>
where
    R: IResourceManager + 'static,
    S: IKeyValueStore + 'static,
{
    pub fn new(config: HotsetConfig, resources: Arc<R>, store: Arc<S>) -> HotsetResult<Arc<Self>> {
        Self::with_clock(config, resources, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: HotsetConfig,
        resources: Arc<R>,
        store: Arc<S>,
        clock: Arc<dyn IClock>,
    ) -> HotsetResult<Arc<Self>> {
        config.validate()?;

        let engine = Self {
            tracker: ScoreTracker::new(&config.ranking),
            prioritizer: PrioritizationEngine::from_config(&config.ranking),
            guard: Arc::new(ModificationGuard::new()),
            eviction: EvictionManager::new(EvictionPolicy::from_config(&config.eviction)),
            snapshots: SnapshotStore::new(Arc::clone(&store), config.storage.snapshot_key.clone()),
            scheduler: DebounceScheduler::new(config.scheduler.debounce()),
            registry: GroupRegistry::new(),
            metrics: Arc::new(Mutex::new(EngineMetrics::new())),
            resources,
            store,
            clock,
            config,
        };

        tracing::info!(
            version = VERSION,
            top_n = engine.config.ranking.top_n,
            pin_mode = engine.config.ranking.pin_mode,
            debounce_ms = engine.config.scheduler.debounce_ms,
            "hotset engine started"
        );
        Ok(Arc::new(engine))
    }

    // ── Inbound events ──────────────────────────────────────────────────

    /// An item became the active item of its group.
    pub fn on_activated(self: &Arc<Self>, item_id: ItemId, group_id: GroupId) {
        let previous = self.tracker.owner_of(item_id);
        let score = self
            .tracker
            .record_activation(item_id, group_id, self.clock.now());
        tracing::debug!(item_id = %item_id, group_id = %group_id, score, "activation recorded");

        // The tracker already dropped the record under the old group.
        if let Some(old_group) = previous.filter(|g| *g != group_id) {
            self.schedule_reorder(old_group);
        }
        self.schedule_reorder(group_id);
    }

    /// An item started loading. Its protection, if any, ends here.
    pub fn on_load_started(&self, item_id: ItemId, group_id: GroupId) {
        let was_protected = self.guard.is_protected(item_id);
        let cycle = self.guard.begin_load_cycle(item_id, group_id);
        if was_protected {
            tracing::debug!(item_id = %item_id, group_id = %group_id, cycle, "protection cleared");
        }
    }

    /// An item finished loading. Only counts while the item is active.
    pub async fn on_load_completed(self: &Arc<Self>, item_id: ItemId, group_id: GroupId, is_active: bool) {
        if !is_active {
            return;
        }
        let score = self
            .tracker
            .record_load_completed(item_id, group_id, self.clock.now());
        tracing::debug!(item_id = %item_id, group_id = %group_id, score, "load completion recorded");

        self.arm_observer(item_id).await;
        self.schedule_reorder(group_id);
    }

    /// An item was closed.
    pub fn on_removed(self: &Arc<Self>, item_id: ItemId, group_id: GroupId) {
        self.tracker.forget(item_id, group_id);
        self.guard.forget(item_id);
        self.schedule_reorder(group_id);
    }

    /// An item left `old_group_id` for another group.
    pub fn on_detached(self: &Arc<Self>, item_id: ItemId, old_group_id: GroupId) {
        self.tracker.forget(item_id, old_group_id);
        self.schedule_reorder(old_group_id);
    }

    /// A group went away with all of its items.
    pub fn on_group_closed(&self, group_id: GroupId) {
        self.scheduler.cancel(group_id);
        self.registry.cancel_follow_up(group_id);
        let dropped = self.tracker.drop_group(group_id);
        let guarded = self.guard.forget_group(group_id, &dropped);
        tracing::debug!(
            group_id = %group_id,
            records = dropped.len(),
            guarded,
            "group state dropped"
        );
    }

    /// The collaborator reports an interaction directly, without a
    /// subscription signal.
    pub fn on_item_modified(&self, item_id: ItemId) {
        if self.guard.mark_modified_now(item_id) {
            events::item_protected(item_id);
            self.metrics_mut().record_protection();
        }
    }

    /// Run a pass right away. Any pending timer for the group is cancelled.
    pub async fn manual_trigger(self: &Arc<Self>, group_id: GroupId) -> HotsetResult<PassOutcome> {
        self.scheduler.cancel(group_id);
        let outcome = self.reorder(group_id).await;
        if let Err(e) = &outcome {
            events::pass_failed(group_id, &e.to_string());
        }
        outcome
    }

    /// Arm (or re-arm) the debounce timer of a group.
    pub fn schedule_reorder(self: &Arc<Self>, group_id: GroupId) -> TimerToken {
        let engine = Arc::downgrade(self);
        self.scheduler.schedule(group_id, move || async move {
            match engine.upgrade() {
                Some(engine) => engine.reorder(group_id).await.map(|_| ()),
                None => Ok(()),
            }
        })
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// The current hot set of a group, without touching it.
    pub async fn top_n(&self, group_id: GroupId, n: usize) -> HotsetResult<Vec<RankedItem>> {
        let items = self.resources.query(group_id).await?;
        let usage = self.tracker.usage(group_id);
        Ok(self.prioritizer.top_n(&items, &usage, n))
    }

    /// Hot-set size the next pass will use.
    pub async fn effective_top_n(&self) -> usize {
        read_top_n(
            &*self.store,
            &self.config.storage.top_n_key,
            self.config.ranking.top_n,
        )
        .await
    }

    pub async fn snapshot(&self, group_id: GroupId) -> HotsetResult<Option<GroupSnapshot>> {
        self.snapshots.load(group_id).await
    }

    pub async fn snapshots(&self) -> HotsetResult<SnapshotBook> {
        self.snapshots.load_all().await
    }

    pub fn score(&self, group_id: GroupId, item_id: ItemId) -> f64 {
        self.tracker.score(group_id, item_id)
    }

    pub fn is_protected(&self, item_id: ItemId) -> bool {
        self.guard.is_protected(item_id)
    }

    /// Number of items with load or protection state.
    pub fn guarded_count(&self) -> usize {
        self.guard.len()
    }

    pub fn is_pending(&self, group_id: GroupId) -> bool {
        self.scheduler.is_pending(group_id)
    }

    pub fn is_busy(&self, group_id: GroupId) -> bool {
        self.registry.is_busy(group_id)
    }

    pub fn metrics(&self) -> EngineMetrics {
        self.metrics_mut().clone()
    }

    pub fn config(&self) -> &HotsetConfig {
        &self.config
    }

    pub(crate) fn metrics_mut(&self) -> MutexGuard<'_, EngineMetrics> {
        lock_metrics(&self.metrics)
    }

    /// Subscribe to the first interaction with an item for its current
    /// load cycle. At most one subscription is outstanding per cycle.
    async fn arm_observer(&self, item_id: ItemId) {
        let Some(cycle) = self.guard.try_arm(item_id) else {
            return;
        };

        match self.resources.subscribe_first_interaction(item_id).await {
            Ok(signal) => {
                let guard = Arc::clone(&self.guard);
                let metrics = Arc::clone(&self.metrics);
                tokio::spawn(async move {
                    match signal.await {
                        Ok(()) => {
                            if guard.mark_modified(item_id, cycle) {
                                events::item_protected(item_id);
                                lock_metrics(&metrics).record_protection();
                            }
                        }
                        Err(_) => guard.observer_closed(item_id, cycle),
                    }
                });
            }
            Err(e) => {
                events::observer_failed(item_id, &e.to_string());
                self.guard.observer_closed(item_id, cycle);
            }
        }
    }
}

fn lock_metrics(metrics: &Mutex<EngineMetrics>) -> MutexGuard<'_, EngineMetrics> {
    metrics.lock().unwrap_or_else(PoisonError::into_inner)
}
