//! Dispatch pipeline — render → rate-gate → send → throttle-aware retry.
//!
//! One `notify` call walks a single message through the full delivery
//! path. Throttling responses are absorbed internally by waiting out the
//! server-issued delay and re-sending the same rendered text; every other
//! delivery failure surfaces to the caller as `false` plus a log entry and
//! is never retried.

use std::time::Duration;

use chrono_tz::Tz;

use visawatch_common::types::AppointmentEvent;

use crate::rate_limit::RateLimiter;
use crate::render;
use crate::transport::{SendError, SendOptions, Transport};

/// Orchestrates notification delivery for a single fixed destination.
pub struct Dispatcher<T: Transport> {
    transport: T,
    limiter: RateLimiter,
    chat_id: String,
    timezone: Tz,
    max_throttle_retries: u32,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(
        transport: T,
        limiter: RateLimiter,
        chat_id: impl Into<String>,
        timezone: Tz,
        max_throttle_retries: u32,
    ) -> Self {
        Self {
            transport,
            limiter,
            chat_id: chat_id.into(),
            timezone,
            max_throttle_retries,
        }
    }

    /// Deliver a notification for `event`.
    ///
    /// Returns `true` when the endpoint accepted the message, `false` on
    /// any terminal delivery failure. A throttled attempt sleeps for the
    /// server-issued delay and re-sends without re-acquiring the local
    /// rate budget — the remote side has already stated the authoritative
    /// constraint. After `max_throttle_retries` consecutive throttles the
    /// send is abandoned.
    pub async fn notify(&self, event: &AppointmentEvent) -> bool {
        let text = render::render(event, self.timezone);
        let options = SendOptions::default();

        self.limiter.acquire().await;

        let mut attempt = 0u32;
        loop {
            match self.transport.send(&self.chat_id, &text, &options).await {
                Ok(()) => {
                    tracing::info!(
                        center = %event.center,
                        mission = %event.mission_code,
                        tracking_count = event.tracking_count,
                        "Notification delivered"
                    );
                    return true;
                }
                Err(SendError::Throttled { retry_after_secs }) => {
                    if attempt >= self.max_throttle_retries {
                        tracing::error!(
                            attempts = attempt + 1,
                            "Giving up on throttled notification after exhausting retries"
                        );
                        return false;
                    }
                    attempt += 1;
                    tracing::warn!(
                        retry_after_secs,
                        attempt,
                        max_retries = self.max_throttle_retries,
                        "Throttled by endpoint, backing off before re-send"
                    );
                    tokio::time::sleep(Duration::from_secs(retry_after_secs)).await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Notification delivery failed");
                    return false;
                }
            }
        }
    }

    /// Stop the rate limiter's background window reset. In-flight `notify`
    /// calls are not cancelled.
    pub fn shutdown(&self) {
        self.limiter.shutdown();
    }
}
