//! Fixed-interval throttle for the registry lookups.
//!
//! The loop is sequential, so the limiter is a plain value owned by it: no locks,
//! no shared state. Timestamps are `tokio::time::Instant` so tests can pause time.

use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// How long a request started at `now` would have to wait.
    pub fn time_until_ready(&self, now: Instant) -> Duration {
        match self.last_request {
            Some(last) => self
                .min_interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Records `now` as the start of an outbound request.
    pub fn mark(&mut self, now: Instant) {
        self.last_request = Some(now);
    }

    /// Waits until the minimum interval since the previous request has passed,
    /// then marks the start of the next one.
    pub async fn acquire(&mut self) {
        let wait = self.time_until_ready(Instant::now());
        if !wait.is_zero() {
            info!(
                "Waiting {:.2}s to respect the registry rate limit",
                wait.as_secs_f64()
            );
            tokio::time::sleep(wait).await;
        }
        self.mark(Instant::now());
    }
}
