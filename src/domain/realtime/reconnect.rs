//! Bounded reconnection policy.
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `max_attempts` | 5 | Consecutive failed attempts before giving up |
//! | `delay` | 1000ms | Wait before the next attempt |
//! | `backoff` | fixed | `Fixed` or `Exponential { max_delay }` |
//!
//! The cap counts every consecutive failed attempt, the first one included.
//! A successful connection resets the count.

use std::time::Duration;

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed,
    /// Delay doubles per failure, capped at `max_delay`.
    Exponential { max_delay: Duration },
}

/// Attempt cap plus delay schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff: Backoff,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(1000),
            backoff: Backoff::Fixed,
        }
    }
}

impl ReconnectPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: Backoff::Fixed,
        }
    }

    pub fn exponential(max_attempts: u32, delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: Backoff::Exponential { max_delay },
        }
    }

    /// Delay to wait after the `failures`-th consecutive failure.
    pub fn delay_after(&self, failures: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential { max_delay } => {
                let exponent = failures.saturating_sub(1).min(16);
                self.delay
                    .checked_mul(1u32 << exponent)
                    .unwrap_or(max_delay)
                    .min(max_delay)
            }
        }
    }

    /// Starts a fresh series of attempts.
    pub fn schedule(&self) -> ReconnectSchedule {
        ReconnectSchedule {
            policy: *self,
            failures: 0,
        }
    }
}

/// Counts consecutive failures against a policy.
#[derive(Debug, Clone)]
pub struct ReconnectSchedule {
    policy: ReconnectPolicy,
    failures: u32,
}

impl ReconnectSchedule {
    /// Records a failed attempt.
    ///
    /// Returns the delay before the next attempt, or `None` once the cap
    /// has been reached and no further attempt may be made.
    pub fn record_failure(&mut self) -> Option<Duration> {
        self.failures = self.failures.saturating_add(1);
        if self.is_exhausted() {
            None
        } else {
            Some(self.policy.delay_after(self.failures))
        }
    }

    /// Clears the failure count after a successful connection.
    pub fn reset(&mut self) {
        self.failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn is_exhausted(&self) -> bool {
        self.failures >= self.policy.max_attempts
    }
}
