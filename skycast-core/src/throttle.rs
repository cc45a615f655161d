//! Rate limiting for outgoing provider calls.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// Minimum spacing between underlying provider calls when not configured.
pub const DEFAULT_DELAY_MS: u64 = 5000;

/// Spaces out calls so that successive issues are at least `delay` apart.
///
/// Callers that arrive too early are suspended, never rejected. The
/// last-issue instant lives behind an async mutex that is held across the
/// wait, so concurrent waiters are served in arrival order and completions
/// are serialized. One limiter belongs to one wrapped provider; there is
/// no process-wide state.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last_issue: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_issue: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspend until the configured interval has elapsed since the
    /// previous issue, then record the new issue time.
    pub async fn acquire(&self) {
        let mut last_issue = self.last_issue.lock().await;

        if let Some(previous) = *last_issue {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                sleep(self.delay - elapsed).await;
            }
        }

        *last_issue = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DELAY_MS))
    }
}
