//! Outbound notification dispatch for appointment tracking events.
//!
//! Pipeline: render the event into Telegram-HTML text, claim a slot from
//! the rolling per-minute rate budget, deliver through the transport, and
//! absorb server-issued throttling with a bounded backoff-and-resend loop.

pub mod dispatcher;
pub mod rate_limit;
pub mod render;
pub mod telegram;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use rate_limit::RateLimiter;
pub use telegram::TelegramClient;
pub use transport::{SendError, SendOptions, Transport};
