use std::time::{Duration, Instant};

use thiserror::Error;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(10_000);

/// Rejection from [`RateLimiter::try_acquire`], carrying the whole seconds
/// left before the next request would pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please wait {remaining_seconds} seconds before making another request")]
pub struct RateLimited {
    pub remaining_seconds: u64,
}

/// Cooldown gate between accepted analyses.
///
/// Check and update happen under one `&mut self` borrow. Callers sharing a
/// limiter between threads must put the whole limiter behind a lock.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    cooldown: Duration,
    last_accepted: Option<Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_cooldown(DEFAULT_COOLDOWN)
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }

    /// Time still to wait at `now`, or `None` when a request would pass.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let last = self.last_accepted?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.cooldown {
            Some(self.cooldown - elapsed)
        } else {
            None
        }
    }

    /// Accept the request at `now` and record it, or reject it without
    /// touching state.
    pub fn try_acquire(&mut self, now: Instant) -> Result<(), RateLimited> {
        if let Some(remaining) = self.remaining(now) {
            return Err(RateLimited {
                remaining_seconds: ceil_seconds(remaining),
            });
        }
        self.last_accepted = Some(now);
        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn ceil_seconds(d: Duration) -> u64 {
    let secs = d.as_nanos().div_ceil(1_000_000_000);
    u64::try_from(secs).unwrap_or(u64::MAX)
}
