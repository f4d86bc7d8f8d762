use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Enforces a minimum interval between outbound requests to one provider.
///
/// The limiter is process-wide per provider: the "next allowed time" advances
/// atomically on every acquisition, so concurrent tasks sharing a throttle
/// never under-space requests.
pub struct Throttle {
    limiter: Option<DefaultDirectRateLimiter>,
}

impl Throttle {
    /// A throttle allowing one request per `interval`. A zero interval means
    /// no pacing.
    pub fn every(interval: Duration) -> Self {
        Self {
            limiter: Quota::with_period(interval).map(RateLimiter::direct),
        }
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::every(Duration::from_millis(interval_ms))
    }

    pub fn unlimited() -> Self {
        Self { limiter: None }
    }

    /// Waits until the provider's window permits the next request, advancing
    /// the window in the same step.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}
