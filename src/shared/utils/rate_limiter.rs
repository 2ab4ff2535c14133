use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Enforces a minimum interval between outbound calls.
///
/// One instance is shared (behind an `Arc`) by every client and every worker,
/// so the spacing holds for the whole run rather than per query. The lock is
/// held while waiting, which serializes waiters and measures every grant
/// against the one before it, however long the limiter sat idle.
pub struct RateLimiter {
    last_grant: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_grant: Mutex::new(None),
            min_interval,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Wait until at least `min_interval` has passed since the previous grant
    pub async fn await_slot(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last = self.last_grant.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Check if a request could go out right now without waiting (for debugging)
    pub fn can_make_request_now(&self) -> bool {
        if self.min_interval.is_zero() {
            return true;
        }

        match self.last_grant.try_lock() {
            Ok(last) => last.map_or(true, |previous| previous.elapsed() >= self.min_interval),
            Err(_) => false,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
