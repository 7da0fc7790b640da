//! Bounded retry with per-class backoff, separated from the transport.
//!
//! The policy knows nothing about HTTP; the transport classifies each failed
//! attempt as rate-limited or transient and the policy decides whether and
//! how long to wait. Tests drive the loop with a recording sleeper instead of
//! real waits.

use std::time::Duration;
use thiserror::Error;

/// Why a single attempt failed, as seen by the retry loop.
#[derive(Debug, Clone, Error)]
pub enum AttemptError {
    /// HTTP 429. The wait before the k-th retry grows linearly with k.
    #[error("rate limited (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Any other transport or HTTP failure. Retried after a fixed wait.
    #[error("transient failure: {0}")]
    Transient(String),
}

/// Sleep abstraction so tests can observe waits instead of serving them.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Production sleeper: blocks the calling thread.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Bounded retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first attempt. A budget of zero
    /// still runs one attempt.
    pub max_attempts: u32,
    /// Base wait for rate-limit retries; the k-th retry waits `base * k`.
    pub rate_limit_backoff: Duration,
    /// Fixed wait before retrying after a transient failure.
    pub transient_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(20),
            transient_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Wait to serve after the `attempt`-th attempt (1-based) failed with
    /// `error`, before the next one.
    pub fn backoff(&self, error: &AttemptError, attempt: u32) -> Duration {
        match error {
            AttemptError::RateLimited { .. } => self.rate_limit_backoff * attempt,
            AttemptError::Transient(_) => self.transient_backoff,
        }
    }

    /// Drive `op` until it succeeds or the attempt budget is exhausted.
    ///
    /// `op` receives the 1-based attempt number. On exhaustion the last
    /// attempt's error is returned.
    pub fn run<T, F>(&self, sleeper: &dyn Sleeper, mut op: F) -> Result<T, AttemptError>
    where
        F: FnMut(u32) -> Result<T, AttemptError>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= self.max_attempts {
                        return Err(error);
                    }
                    let wait = self.backoff(&error, attempt);
                    tracing::warn!(
                        "attempt {attempt}/{} failed ({error}); retrying in {wait:?}",
                        self.max_attempts
                    );
                    sleeper.sleep(wait);
                    attempt += 1;
                }
            }
        }
    }
}
