//! Transport seam — the delivery channel the dispatcher depends on.
//!
//! The dispatcher only ever sees this trait; the concrete Telegram client
//! lives in [`crate::telegram`] and tests substitute scripted mocks.

use async_trait::async_trait;
use thiserror::Error;

/// Per-send delivery options understood by the transport.
#[derive(Debug, Clone, Copy)]
pub struct SendOptions {
    /// Interpret the text as restricted HTML markup (bold labels only).
    pub parse_mode_html: bool,

    /// Suppress link previews for any URL appearing in the text.
    pub disable_link_preview: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            parse_mode_html: true,
            disable_link_preview: true,
        }
    }
}

/// Errors a transport can report for a single send attempt.
#[derive(Debug, Error)]
pub enum SendError {
    /// Remote signal to slow down, carrying the server-issued wait.
    #[error("throttled by remote endpoint, retry after {retry_after_secs}s")]
    Throttled { retry_after_secs: u64 },

    /// The endpoint rejected the request (bad destination, malformed payload, ...).
    #[error("endpoint rejected send ({status}): {description}")]
    Api { status: u16, description: String },

    /// The request never produced an endpoint response.
    #[error("network failure: {0}")]
    Network(String),
}

/// A delivery channel for rendered notification text.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `text` to `destination`, returning once the endpoint has
    /// accepted or rejected the message.
    async fn send(
        &self,
        destination: &str,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), SendError>;
}
