//! Limiter that spaces outbound requests
//!
//! A request proceeds only once the previous one is at least one interval in
//! the past, so at most one request goes out per tick. A zero interval
//! disables limiting.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{Clock, SystemClock};

/// Errors raised while waiting on the limiter
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LimiterError {
    /// The caller's cancellation token fired before a slot was available.
    #[error("rate limiter wait cancelled")]
    Cancelled,
}

/// Request limiter with burst size one
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use tokio_util::sync::CancellationToken;
/// use zotero_common::resilience::RequestLimiter;
///
/// # async fn example() -> Result<(), zotero_common::LimiterError> {
/// let limiter = RequestLimiter::new(Duration::from_millis(100));
/// let cancel = CancellationToken::new();
///
/// limiter.acquire(&cancel).await?; // immediate
/// limiter.acquire(&cancel).await?; // waits for the next tick
/// # Ok(())
/// # }
/// ```
pub struct RequestLimiter<C: Clock = SystemClock> {
    interval: Duration,
    next_allowed: Arc<Mutex<Instant>>,
    clock: Arc<C>,
}

impl RequestLimiter<SystemClock> {
    /// Limiter on the system clock
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, SystemClock)
    }

    /// Limiter that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<C: Clock> RequestLimiter<C> {
    /// Limiter driven by a custom clock
    pub fn with_clock(interval: Duration, clock: C) -> Self {
        Self {
            interval,
            next_allowed: Arc::new(Mutex::new(clock.now())),
            clock: Arc::new(clock),
        }
    }

    /// Minimum spacing between requests
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when the interval is zero
    pub fn is_disabled(&self) -> bool {
        self.interval.is_zero()
    }

    /// Take the slot if it is free, without waiting
    ///
    /// The next slot opens one interval after this call, however long the
    /// limiter sat idle before it.
    pub fn try_acquire(&self) -> bool {
        if self.is_disabled() {
            return true;
        }

        let now = self.clock.now();
        let mut next_allowed = self.next_allowed.lock();
        if now < *next_allowed {
            return false;
        }
        *next_allowed = now + self.interval;
        true
    }

    /// Time until the next slot opens
    pub fn time_until_available(&self) -> Duration {
        if self.is_disabled() {
            return Duration::ZERO;
        }

        let now = self.clock.now();
        self.next_allowed.lock().saturating_duration_since(now)
    }

    /// Wait for a slot, giving up when `cancel` fires
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), LimiterError> {
        loop {
            if cancel.is_cancelled() {
                return Err(LimiterError::Cancelled);
            }
            if self.try_acquire() {
                return Ok(());
            }

            let wait = self.time_until_available().max(Duration::from_millis(1));
            debug!(wait_ms = wait.as_millis() as u64, "waiting for rate limiter");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LimiterError::Cancelled),
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }
}

impl<C: Clock> Clone for RequestLimiter<C> {
    fn clone(&self) -> Self {
        Self {
            interval: self.interval,
            next_allowed: Arc::clone(&self.next_allowed),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: Clock> std::fmt::Debug for RequestLimiter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLimiter")
            .field("interval", &self.interval)
            .field("wait", &self.time_until_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::MockClock;

    #[test]
    fn one_request_per_interval() {
        let clock = MockClock::new();
        let limiter = RequestLimiter::with_clock(Duration::from_secs(1), clock.clone());

        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());

        clock.advance_millis(999);
        assert!(!limiter.try_acquire());

        clock.advance_millis(1);
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn spacing_counts_from_the_first_request_not_construction() {
        let clock = MockClock::new();
        let limiter = RequestLimiter::with_clock(Duration::from_secs(1), clock.clone());

        clock.advance_millis(500);
        assert!(limiter.try_acquire());

        clock.advance_millis(500);
        assert!(!limiter.try_acquire(), "second request only 500ms after the first");
        assert_eq!(limiter.time_until_available(), Duration::from_millis(500));

        clock.advance_millis(500);
        assert!(limiter.try_acquire());
    }

    #[test]
    fn idle_time_never_builds_a_burst() {
        let clock = MockClock::new();
        let limiter = RequestLimiter::with_clock(Duration::from_secs(1), clock.clone());

        assert!(limiter.try_acquire());
        clock.advance(Duration::from_secs(10));

        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn remaining_wait_shrinks_with_time() {
        let clock = MockClock::new();
        let limiter = RequestLimiter::with_clock(Duration::from_millis(500), clock.clone());

        assert_eq!(limiter.time_until_available(), Duration::ZERO);
        assert!(limiter.try_acquire());
        assert_eq!(limiter.time_until_available(), Duration::from_millis(500));

        clock.advance_millis(200);
        assert_eq!(limiter.time_until_available(), Duration::from_millis(300));
    }

    #[test]
    fn zero_interval_disables_limiting() {
        let limiter = RequestLimiter::disabled();
        assert!(limiter.is_disabled());
        for _ in 0..100 {
            assert!(limiter.try_acquire());
        }
    }

    #[test]
    fn clones_share_the_next_slot() {
        let clock = MockClock::new();
        let limiter = RequestLimiter::with_clock(Duration::from_secs(1), clock);
        let clone = limiter.clone();

        assert!(limiter.try_acquire());
        assert!(!clone.try_acquire());
    }

    #[tokio::test]
    async fn cancelled_token_fails_before_waiting() {
        let limiter = RequestLimiter::new(Duration::from_secs(60));
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(limiter.acquire(&cancel).await, Err(LimiterError::Cancelled));
        assert!(limiter.try_acquire(), "cancelled wait must not consume the slot");
    }
}
