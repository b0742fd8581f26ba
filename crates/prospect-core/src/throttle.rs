//! Fixed-interval request spacing.
//!
//! Every outbound client owns a [`Throttle`] sized to the rate limit of the
//! upstream it talks to. Callers await [`Throttle::wait`] immediately before
//! issuing a request: the first call returns at once and each later call
//! waits for the next cell of a one-request-per-period `governor` quota.

use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

pub struct Throttle {
    /// `None` for a zero period, which never waits.
    limiter: Option<DefaultDirectRateLimiter>,
}

impl Throttle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            limiter: Quota::with_period(min_interval).map(RateLimiter::direct),
        }
    }

    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}
