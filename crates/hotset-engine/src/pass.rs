//! The reorder pass.
//!
//! 1. Read the hot-set size.
//! 2. Query the group; stop if it is empty.
//! 3. Rank and take the hot set.
//! 4. Move the hot set to the front, or pin it and unpin the rest.
//! 5. Sweep the remaining items for idle ones.
//! 6. Record the snapshot of everything outside the hot set.
//!
//! Per-item failures in steps 4 and 5 are logged and skipped. Only a failed
//! query fails the pass.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::Instrument;
use uuid::Uuid;

use hotset_core::errors::{HotsetError, HotsetResult};
use hotset_core::models::{
    FailedOperation, GroupId, Item, ItemId, PassFailure, PassOutcome, PassReport,
};
use hotset_core::traits::{IKeyValueStore, IResourceManager};
use hotset_observability::reorder_span;
use hotset_observability::tracing_setup::events;

use crate::engine::HotsetEngine;

impl<R, S> HotsetEngine<R, S>
where
    R: IResourceManager + 'static,
    S: IKeyValueStore + 'static,
{
    /// Run one pass for a group unless one is already in flight, in which
    /// case a follow-up is queued behind it.
    pub(crate) async fn reorder(self: &Arc<Self>, group_id: GroupId) -> HotsetResult<PassOutcome> {
        let Some(mut claim) = PassClaim::acquire(self, group_id) else {
            events::pass_deferred(group_id);
            self.metrics_mut().record_deferral();
            return Ok(PassOutcome::Deferred);
        };

        let result = self.run_pass(group_id).await;
        claim.finished = true;

        match &result {
            Ok(PassOutcome::Completed(report)) => self.metrics_mut().record_pass(report),
            Ok(_) => {}
            Err(_) => self.metrics_mut().record_failure(),
        }
        result
    }

    async fn run_pass(&self, group_id: GroupId) -> HotsetResult<PassOutcome> {
        let pass_id = Uuid::new_v4().to_string();
        let span = reorder_span!(group_id, pass_id);
        self.pass_steps(group_id, pass_id).instrument(span).await
    }

    async fn pass_steps(&self, group_id: GroupId, pass_id: String) -> HotsetResult<PassOutcome> {
        let top_n = self.effective_top_n().await;

        let items = self
            .resources
            .query(group_id)
            .await
            .map_err(|e| HotsetError::PassFailed {
                group_id,
                reason: e.to_string(),
            })?;
        if items.is_empty() {
            tracing::debug!(group_id = %group_id, "group empty, nothing to do");
            return Ok(PassOutcome::Empty);
        }

        let usage = self.tracker.usage(group_id);
        let top: Vec<ItemId> = self
            .prioritizer
            .top_n(&items, &usage, top_n)
            .into_iter()
            .map(|ranked| ranked.item.id)
            .collect();

        let mut failures = Vec::new();
        let mut pin_updates = 0;
        let repositioned = if self.config.ranking.pin_mode {
            pin_updates = self.apply_pins(&items, &top, &mut failures).await;
            self.move_to_front(&top, true, &mut failures).await
        } else {
            self.move_to_front(&top, false, &mut failures).await
        };

        let hot: HashSet<ItemId> = top.iter().copied().collect();
        let candidates: Vec<Item> = items
            .iter()
            .filter(|item| !hot.contains(&item.id) && self.prioritizer.is_eligible(item))
            .cloned()
            .collect();

        let now = self.clock.now();
        let sweep = self
            .eviction
            .sweep(
                &*self.resources,
                group_id,
                &candidates,
                &usage,
                &self.guard,
                now,
            )
            .await;
        failures.extend(sweep.failures);

        let snapshot_written = match self
            .snapshots
            .save(group_id, &items, &top, &sweep.suspended, now)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                events::snapshot_failed(group_id, &e.to_string());
                false
            }
        };

        let report = PassReport {
            pass_id,
            group_id,
            top_n,
            top,
            repositioned,
            pin_updates,
            suspended: sweep.suspended,
            protected_skipped: sweep.protected_skipped,
            failures,
            snapshot_written,
            completed_at: now,
        };
        events::pass_completed(
            group_id,
            &report.top,
            report.suspended.len(),
            report.failures.len(),
        );
        Ok(PassOutcome::Completed(report))
    }

    /// Move `top` to indices 0, 1, 2, … in order.
    ///
    /// With `advance_on_failure` unset, an item that cannot be moved does not
    /// take up an index, so the next item lands where it would have gone.
    async fn move_to_front(
        &self,
        top: &[ItemId],
        advance_on_failure: bool,
        failures: &mut Vec<PassFailure>,
    ) -> Vec<ItemId> {
        let mut placed = Vec::with_capacity(top.len());
        let mut index = 0;

        for &item_id in top {
            match self.resources.reposition(item_id, index).await {
                Ok(()) => {
                    placed.push(item_id);
                    index += 1;
                }
                Err(e) => {
                    let reason = e.to_string();
                    events::reposition_failed(item_id, index, &reason);
                    failures.push(PassFailure {
                        item_id,
                        operation: FailedOperation::Reposition,
                        reason,
                    });
                    if advance_on_failure {
                        index += 1;
                    }
                }
            }
        }
        placed
    }

    /// Pin every hot item and unpin every other one, all requests at once.
    /// Returns the number of successful updates.
    async fn apply_pins(
        &self,
        items: &[Item],
        top: &[ItemId],
        failures: &mut Vec<PassFailure>,
    ) -> usize {
        let hot: HashSet<ItemId> = top.iter().copied().collect();
        let requests = items.iter().map(|item| {
            let pinned = hot.contains(&item.id);
            async move {
                let result = self.resources.set_pinned(item.id, pinned).await;
                (item.id, pinned, result)
            }
        });

        let mut updated = 0;
        for (item_id, pinned, result) in join_all(requests).await {
            match result {
                Ok(()) => updated += 1,
                Err(e) => {
                    let reason = e.to_string();
                    events::pin_failed(item_id, pinned, &reason);
                    failures.push(PassFailure {
                        item_id,
                        operation: FailedOperation::SetPinned,
                        reason,
                    });
                }
            }
        }
        updated
    }
}

/// A group's pass slot. Released on drop, so a pass whose future is dropped
/// part way still frees the group and runs any follow-up requested meanwhile.
struct PassClaim<'a, R, S>
where
    R: IResourceManager + 'static,
    S: IKeyValueStore + 'static,
{
    engine: &'a Arc<HotsetEngine<R, S>>,
    group_id: GroupId,
    finished: bool,
}

impl<'a, R, S> PassClaim<'a, R, S>
where
    R: IResourceManager + 'static,
    S: IKeyValueStore + 'static,
{
    fn acquire(engine: &'a Arc<HotsetEngine<R, S>>, group_id: GroupId) -> Option<Self> {
        if !engine.registry.try_begin(group_id) {
            return None;
        }
        Some(Self {
            engine,
            group_id,
            finished: false,
        })
    }
}

impl<R, S> Drop for PassClaim<'_, R, S>
where
    R: IResourceManager + 'static,
    S: IKeyValueStore + 'static,
{
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(group_id = %self.group_id, "pass dropped before completion");
        }
        let follow_up = self.engine.registry.finish(self.group_id);
        // Outside a runtime there is nothing to schedule on.
        if follow_up && tokio::runtime::Handle::try_current().is_ok() {
            self.engine.schedule_reorder(self.group_id);
        }
    }
}
