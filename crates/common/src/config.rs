use std::str::FromStr;

use serde::Deserialize;

/// Default sends-per-minute quota imposed on the notification channel.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 20;

/// Default IANA time zone used when rendering timestamps (deployment zone).
pub const DEFAULT_TIMEZONE: &str = "Europe/Istanbul";

/// Default number of consecutive throttle retries before a send is abandoned.
pub const DEFAULT_MAX_THROTTLE_RETRIES: u32 = 5;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Telegram bot token used for message delivery
    pub telegram_bot_token: String,

    /// Telegram chat ID the notifier delivers to (single fixed destination)
    pub telegram_chat_id: String,

    /// Maximum messages per rolling 60-second window (default: 20)
    pub rate_limit_per_minute: u32,

    /// IANA time zone for rendering timestamps (default: Europe/Istanbul)
    pub timezone: chrono_tz::Tz,

    /// Throttle retries before a send is abandoned (default: 5)
    pub max_throttle_retries: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let rate_limit_per_minute: u32 = std::env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_PER_MINUTE.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("RATE_LIMIT_PER_MINUTE must be a valid u32"))?;
        if rate_limit_per_minute == 0 {
            anyhow::bail!("RATE_LIMIT_PER_MINUTE must be at least 1");
        }

        let timezone = std::env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let timezone = chrono_tz::Tz::from_str(&timezone)
            .map_err(|_| anyhow::anyhow!("TIMEZONE must be a valid IANA zone name: {timezone}"))?;

        Ok(Self {
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("TELEGRAM_BOT_TOKEN environment variable is required"))?,
            telegram_chat_id: std::env::var("TELEGRAM_CHAT_ID")
                .map_err(|_| anyhow::anyhow!("TELEGRAM_CHAT_ID environment variable is required"))?,
            rate_limit_per_minute,
            timezone,
            max_throttle_retries: std::env::var("MAX_THROTTLE_RETRIES")
                .unwrap_or_else(|_| DEFAULT_MAX_THROTTLE_RETRIES.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_THROTTLE_RETRIES must be a valid u32"))?,
        })
    }
}
