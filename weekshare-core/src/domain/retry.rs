// weekshare-core/src/domain/retry.rs

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Backoff policy for outbound calls that hit upstream throttling.
///
/// Wait before retry `n` (1-based) is `base * multiplier^(n-1)`, capped at
/// `max_delay`, plus up to `jitter` of random extra delay. `throttle_floor` is
/// the pause taken after every successful call to stay under the steady-state
/// rate ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RetryPolicy {
    #[validate(range(min = 1))]
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    #[validate(range(min = 1.0))]
    pub multiplier: f64,
    pub max_delay_ms: u64,
    pub jitter_ms: u64,
    pub throttle_floor_ms: u64,
}

impl Default for RetryPolicy {
    // 6s then 9s between attempts, 0.5s between successful grants.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 6_000,
            multiplier: 1.5,
            max_delay_ms: 30_000,
            jitter_ms: 0,
            throttle_floor_ms: 500,
        }
    }
}

impl RetryPolicy {
    pub fn throttle_floor(&self) -> Duration {
        Duration::from_millis(self.throttle_floor_ms)
    }

    /// Deterministic part of the wait after failed attempt `attempt` (1-based).
    pub fn base_delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32) as i32;
        let raw = self.base_delay_ms as f64 * self.multiplier.powi(exponent);
        let capped = raw.min(self.max_delay_ms as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.base_delay_for(attempt);
        if self.jitter_ms == 0 {
            return base;
        }
        let extra = rand::rng().random_range(0..=self.jitter_ms);
        base + Duration::from_millis(extra)
    }
}
