//! EvictionManager — the suspension sweep over a group's non-hot items.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::Instrument;

use hotset_core::models::{
    FailedOperation, GroupId, Item, ItemId, PassFailure, UsageRecord,
};
use hotset_core::traits::IResourceManager;
use hotset_observability::sweep_span;
use hotset_observability::tracing_setup::events;

use crate::guard::ModificationGuard;
use crate::policy::{EvictionDecision, EvictionPolicy, EvictionReason};

/// What a sweep did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    pub decisions: Vec<EvictionDecision>,
    /// Items whose suspend request succeeded.
    pub suspended: Vec<ItemId>,
    pub protected_skipped: Vec<ItemId>,
    pub failures: Vec<PassFailure>,
}

pub struct EvictionManager {
    policy: EvictionPolicy,
}

impl EvictionManager {
    pub fn new(policy: EvictionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EvictionPolicy {
        &self.policy
    }

    /// Evaluate every candidate and request suspension of the stale ones.
    ///
    /// Requests are issued one at a time. A refused request is logged and
    /// recorded; the sweep always visits every candidate.
    pub async fn sweep<R: IResourceManager>(
        &self,
        resources: &R,
        group_id: GroupId,
        candidates: &[Item],
        usage: &HashMap<ItemId, UsageRecord>,
        guard: &ModificationGuard,
        now: DateTime<Utc>,
    ) -> SweepReport {
        let span = sweep_span!(group_id, candidates.len());
        async {
            let mut report = SweepReport::default();

            for item in candidates {
                let decision = self.policy.evaluate(
                    item,
                    usage.get(&item.id).map(|r| r.last_used),
                    guard.is_protected(item.id),
                    now,
                );

                if decision.reason == EvictionReason::Protected {
                    report.protected_skipped.push(item.id);
                }

                if decision.should_suspend {
                    match resources.suspend(item.id).await {
                        Ok(()) => {
                            events::item_suspended(
                                group_id,
                                item.id,
                                decision.idle_for.num_seconds(),
                            );
                            report.suspended.push(item.id);
                        }
                        Err(e) => {
                            let reason = e.to_string();
                            events::suspend_failed(item.id, &reason);
                            report.failures.push(PassFailure {
                                item_id: item.id,
                                operation: FailedOperation::Suspend,
                                reason,
                            });
                        }
                    }
                } else {
                    tracing::trace!(item_id = %item.id, reason = %decision.reason, "kept");
                }

                report.decisions.push(decision);
            }

            report
        }
        .instrument(span)
        .await
    }
}

impl Default for EvictionManager {
    fn default() -> Self {
        Self::new(EvictionPolicy::default())
    }
}
