//! DebounceScheduler — one cancellable timer task per group.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::AbortHandle;

use hotset_core::errors::HotsetResult;
use hotset_core::models::GroupId;
use hotset_observability::tracing_setup::events;

/// Identifies one armed timer. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

struct PendingTimer {
    token: TimerToken,
    handle: AbortHandle,
}

/// Cancel-and-replace timers keyed by group.
///
/// At most one timer is pending per group. A timer that has woken up and
/// claimed its slot is no longer pending: re-arming the group starts a new
/// timer and never aborts the task that is already running.
pub struct DebounceScheduler {
    delay: Duration,
    pending: Arc<DashMap<GroupId, PendingTimer>>,
    next_token: AtomicU64,
}

impl DebounceScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(DashMap::new()),
            next_token: AtomicU64::new(1),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the timer for `group_id`. When it expires, `task`
    /// runs exactly once. An `Err` from the task is logged and dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, group_id: GroupId, task: F) -> TimerToken
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = HotsetResult<()>> + Send + 'static,
    {
        let token = TimerToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;

        // The entry lock is held until the new timer is registered, so the
        // task can't try to claim its slot before it exists.
        match self.pending.entry(group_id) {
            Entry::Occupied(mut slot) => {
                slot.get().handle.abort();
                let handle = spawn_timer(pending, group_id, token, delay, task);
                slot.insert(PendingTimer { token, handle });
            }
            Entry::Vacant(slot) => {
                let handle = spawn_timer(pending, group_id, token, delay, task);
                slot.insert(PendingTimer { token, handle });
            }
        }
        tracing::trace!(group_id = %group_id, token = token.0, "debounce timer armed");
        token
    }

    /// Cancel the pending timer of a group. Returns false if none was pending.
    pub fn cancel(&self, group_id: GroupId) -> bool {
        match self.pending.remove(&group_id) {
            Some((_, timer)) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, group_id: GroupId) -> bool {
        self.pending.contains_key(&group_id)
    }

    /// Token of the pending timer for a group, if any.
    pub fn pending_token(&self, group_id: GroupId) -> Option<TimerToken> {
        self.pending.get(&group_id).map(|timer| timer.token)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        for timer in self.pending.iter() {
            timer.handle.abort();
        }
    }
}

fn spawn_timer<F, Fut>(
    pending: Arc<DashMap<GroupId, PendingTimer>>,
    group_id: GroupId,
    token: TimerToken,
    delay: Duration,
    task: F,
) -> AbortHandle
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = HotsetResult<()>> + Send + 'static,
{
    let join = tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        // Claim: only the timer that still owns the slot may fire.
        if pending
            .remove_if(&group_id, |_, timer| timer.token == token)
            .is_none()
        {
            return;
        }

        if let Err(e) = task().await {
            events::pass_failed(group_id, &e.to_string());
        }
    });
    join.abort_handle()
}
