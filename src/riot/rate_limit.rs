use std::num::NonZeroU32;
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use reqwest::header::{HeaderMap, RETRY_AFTER};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const LONG_WINDOW: Duration = Duration::from_secs(120);

/// Enforces both Riot development key windows: a per-second burst cap and a
/// rolling two minute cap.
#[derive(Debug)]
pub struct DualWindowLimiter {
    short: DirectLimiter,
    long: DirectLimiter,
}

impl DualWindowLimiter {
    pub fn new(per_second: NonZeroU32, per_two_minutes: NonZeroU32) -> Self {
        let short = Quota::per_second(per_second);
        let long = Quota::with_period(LONG_WINDOW / per_two_minutes.get())
            .map(|q| q.allow_burst(per_two_minutes))
            .unwrap_or_else(|| Quota::per_second(per_two_minutes));

        Self {
            short: RateLimiter::direct(short),
            long: RateLimiter::direct(long),
        }
    }

    /// Wait until a request fits in both windows.
    pub async fn until_ready(&self) {
        self.long.until_ready().await;
        self.short.until_ready().await;
    }
}

impl Default for DualWindowLimiter {
    fn default() -> Self {
        Self::new(nonzero!(20_u32), nonzero!(100_u32))
    }
}

/// How the client reacts to `429 Too Many Requests`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before the attempt following `attempt` (1-based). A server hint
    /// wins over the computed backoff but is still capped at `max_backoff`.
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(hint) = retry_after {
            return hint.min(self.max_backoff);
        }

        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Reads a `Retry-After` header expressed in seconds.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
