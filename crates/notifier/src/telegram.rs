//! Telegram delivery — `sendMessage` over the Bot API.
//!
//! Translates Bot API outcomes into the transport taxonomy: HTTP 429 with a
//! `parameters.retry_after` body becomes [`SendError::Throttled`], any other
//! rejection becomes [`SendError::Api`], and connection-level failures
//! become [`SendError::Network`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::transport::{SendError, SendOptions, Transport};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Fallback wait when a 429 response carries no `retry_after` parameter.
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
    disable_web_page_preview: bool,
}

/// Subset of the Bot API error envelope the notifier inspects.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

/// Telegram Bot API client.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl TelegramClient {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self::with_base_url(bot_token, TELEGRAM_API_BASE)
    }

    /// Build a client against a non-default API host (tests).
    pub fn with_base_url(bot_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bot_token: bot_token.into(),
        }
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send(
        &self,
        destination: &str,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), SendError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let request = SendMessageRequest {
            chat_id: destination,
            text,
            parse_mode: options.parse_mode_html.then_some("HTML"),
            disable_web_page_preview: options.disable_link_preview,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(chat_id = destination, "sendMessage accepted");
            return Ok(());
        }

        let body: ApiErrorResponse = response.json().await.unwrap_or_default();

        if status.as_u16() == 429 {
            let retry_after_secs = body
                .parameters
                .and_then(|p| p.retry_after)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(SendError::Throttled { retry_after_secs });
        }

        Err(SendError::Api {
            status: status.as_u16(),
            description: body
                .description
                .unwrap_or_else(|| "no description".to_string()),
        })
    }
}
