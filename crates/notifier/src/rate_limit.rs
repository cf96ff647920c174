//! Rate limiting — rolling one-minute send budget.
//!
//! Tracks how many sends happened since the current window opened. A send
//! either claims a slot immediately or suspends until the window rolls
//! over. An explicitly owned background task resets stale windows every 60
//! seconds so the counter cannot go stale while no sends occur.
//!
//! State is held in-memory per limiter instance. If the process restarts,
//! the window resets — the remote endpoint remains the authoritative
//! enforcer either way.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use visawatch_common::error::AppError;

/// Length of the rolling send window.
const WINDOW: Duration = Duration::from_secs(60);

/// The rolling window state. Mutated only under the limiter's lock.
#[derive(Debug)]
struct RateWindow {
    count: u32,
    window_start: Instant,
}

impl RateWindow {
    fn is_stale(&self, now: Instant) -> bool {
        now.duration_since(self.window_start) >= WINDOW
    }

    fn reset(&mut self, now: Instant) {
        self.count = 0;
        self.window_start = now;
    }
}

/// In-process rolling-window rate limiter.
pub struct RateLimiter {
    quota: u32,
    window: Arc<Mutex<RateWindow>>,
    reset_task: JoinHandle<()>,
}

impl RateLimiter {
    /// Create a limiter admitting at most `quota` sends per rolling minute
    /// and start its background window-reset task.
    pub fn new(quota: u32) -> Result<Self, AppError> {
        if quota == 0 {
            return Err(AppError::Config(
                "rate limit quota must be at least 1".to_string(),
            ));
        }

        let window = Arc::new(Mutex::new(RateWindow {
            count: 0,
            window_start: Instant::now(),
        }));

        // Periodic reset, guarded by the same staleness check `acquire`
        // uses: whichever mechanism sees the stale window first establishes
        // the new one, and a fresh window is never reset twice.
        let tick_window = Arc::clone(&window);
        let reset_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + WINDOW, WINDOW);
            loop {
                interval.tick().await;
                let mut w = tick_window.lock().await;
                let now = Instant::now();
                if w.is_stale(now) {
                    w.reset(now);
                    tracing::debug!("Rate window reset by periodic tick");
                }
            }
        });

        Ok(Self {
            quota,
            window,
            reset_task,
        })
    }

    /// Claim one send slot, suspending until the window rolls over if the
    /// quota is exhausted.
    ///
    /// The lock is never held across the sleep, so waiting callers do not
    /// block concurrent acquires or the reset tick.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut w = self.window.lock().await;
                let now = Instant::now();
                if w.is_stale(now) {
                    w.reset(now);
                }
                if w.count < self.quota {
                    w.count += 1;
                    return;
                }
                WINDOW - now.duration_since(w.window_start)
            };

            tracing::debug!(
                wait_ms = wait.as_millis() as u64,
                quota = self.quota,
                "Rate budget exhausted, waiting for window to roll over"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of sends admitted in the current window (for monitoring).
    pub async fn current_count(&self) -> u32 {
        self.window.lock().await.count
    }

    /// Cancel the background window-reset task. `acquire` must not be
    /// called after shutdown.
    pub fn shutdown(&self) {
        self.reset_task.abort();
    }
}
