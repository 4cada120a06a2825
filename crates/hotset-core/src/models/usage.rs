use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accumulated usage for one `(group, item)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Non-negative, only ever increased while the record lives.
    pub score: f64,
    pub last_used: DateTime<Utc>,
}

impl UsageRecord {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            score: 0.0,
            last_used: now,
        }
    }

    /// Add `weight` to the score and stamp the record with `now`.
    /// Negative or non-finite weights are ignored so the score never decreases.
    pub fn bump(&mut self, weight: f64, now: DateTime<Utc>) -> f64 {
        if weight.is_finite() && weight > 0.0 {
            self.score += weight;
        }
        self.last_used = now;
        self.score
    }

    /// Time since last use, relative to `now`.
    pub fn idle_for(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.last_used
    }
}
