//! Passes run, deferred, failed; suspensions; per-item operation failures.

use serde::{Deserialize, Serialize};

use hotset_core::models::{FailedOperation, PassReport};

/// Engine-level counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineMetrics {
    pub passes_completed: u64,
    pub passes_failed: u64,
    pub passes_deferred: u64,
    pub items_suspended: u64,
    pub protected_skips: u64,
    pub reposition_failures: u64,
    pub pin_failures: u64,
    pub suspend_failures: u64,
    pub snapshots_written: u64,
    pub protections_granted: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a completed pass into the counters.
    pub fn record_pass(&mut self, report: &PassReport) {
        self.passes_completed += 1;
        self.items_suspended += report.suspended.len() as u64;
        self.protected_skips += report.protected_skipped.len() as u64;
        if report.snapshot_written {
            self.snapshots_written += 1;
        }
        for failure in &report.failures {
            match failure.operation {
                FailedOperation::Reposition => self.reposition_failures += 1,
                FailedOperation::SetPinned => self.pin_failures += 1,
                FailedOperation::Suspend => self.suspend_failures += 1,
            }
        }
    }

    pub fn record_failure(&mut self) {
        self.passes_failed += 1;
    }

    pub fn record_deferral(&mut self) {
        self.passes_deferred += 1;
    }

    pub fn record_protection(&mut self) {
        self.protections_granted += 1;
    }

    /// Fraction of finished passes that failed outright (0.0–1.0).
    pub fn failure_rate(&self) -> f64 {
        let total = self.passes_completed + self.passes_failed;
        if total == 0 {
            return 0.0;
        }
        self.passes_failed as f64 / total as f64
    }
}
