//! Minimum-interval rate limiting for one provider.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Paces calls so that consecutive requests on this instance are at least
/// `min_interval` apart.
///
/// The limiter is an explicit object, constructed once per provider and
/// injected into whichever component holds that provider's client. It
/// serializes callers on this instance but does not coordinate across
/// instances - two limiters for two providers never wait on each other.
///
/// The last-request marker advances on [`acquire`](RateLimiter::acquire),
/// before the call is attempted, so failed calls still count against the
/// rate budget.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Limiter for a provider allowing `rate_limit` requests per minute.
    ///
    /// `min_interval = 60_000 / rate_limit` milliseconds. A rate limit of 0
    /// is treated as unlimited.
    pub fn per_minute(rate_limit: u32) -> Self {
        let min_interval = if rate_limit == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(60_000 / u64::from(rate_limit))
        };
        Self::with_interval(min_interval)
    }

    /// Limiter with an explicit minimum interval.
    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// The minimum interval between consecutive requests.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait out any remainder of the minimum interval since the previous
    /// acquisition, then advance the last-request marker.
    ///
    /// Callers holding the same limiter are serialized: the lock is held
    /// across the wait, so concurrent acquires queue and each gets its own
    /// slot `min_interval` after the previous one.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            // sleep_until returns immediately when the deadline has passed
            tokio::time::sleep_until(prev + self.min_interval).await;
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn first_acquire_is_immediate() {
        let limiter = RateLimiter::per_minute(60);
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_acquires_are_spaced() {
        // 60 requests/minute -> 1 second between calls
        let limiter = RateLimiter::per_minute(60);
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_acquires_serialize() {
        let limiter = Arc::new(RateLimiter::per_minute(120)); // 500ms apart
        limiter.acquire().await;

        let start = Instant::now();
        let a = tokio::spawn({
            let l = limiter.clone();
            async move { l.acquire().await }
        });
        let b = tokio::spawn({
            let l = limiter.clone();
            async move { l.acquire().await }
        });
        a.await.unwrap();
        b.await.unwrap();

        // Two more slots after the initial one: at least a full second passes.
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_rate_means_unlimited() {
        let limiter = RateLimiter::per_minute(0);
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn marker_advances_without_success_signal() {
        // acquire() alone moves the marker - there is no "report success"
        // call, so a failed request cannot refund its slot.
        let limiter = RateLimiter::per_minute(60);
        limiter.acquire().await; // pretend this call failed

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
