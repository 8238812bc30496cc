//! Inter-call rate limiting with an explicit, injectable limiter value.

use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Enforces a minimum spacing between successive inference attempts.
///
/// `acquire` is the single serialization point: callers queue on one
/// mutex in arrival order, each re-checking the elapsed time after
/// acquisition, wait out the remaining floor, and receive a permit. The
/// permit keeps the critical section held across the attempt and
/// [`CallPermit::complete`] advances the last-attempt marker, so failed
/// attempts throttle the next caller just like successful ones.
pub struct RateLimiter {
    floor: Duration,
    last_attempt: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(floor: Duration) -> Self {
        Self {
            floor,
            last_attempt: Mutex::new(None),
        }
    }

    /// Wait until the floor has elapsed since the last completed attempt.
    pub async fn acquire(&self) -> CallPermit<'_> {
        let slot = self.last_attempt.lock().await;

        let wait = slot
            .map(|last| self.floor.saturating_sub(last.elapsed()))
            .unwrap_or(Duration::ZERO);

        if !wait.is_zero() {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "throttling inference call");
            tokio::time::sleep(wait).await;
        }

        CallPermit { slot, waited: wait }
    }
}

/// Permission to run one attempt.
///
/// Dropping the permit without calling [`complete`](Self::complete)
/// releases the critical section without advancing the marker.
pub struct CallPermit<'a> {
    slot: MutexGuard<'a, Option<Instant>>,
    waited: Duration,
}

impl CallPermit<'_> {
    /// How long this caller was suspended before the permit was granted.
    pub fn waited(&self) -> Duration {
        self.waited
    }

    /// Record that the attempt completed, successfully or not.
    pub fn complete(mut self) {
        *self.slot = Some(Instant::now());
    }
}
