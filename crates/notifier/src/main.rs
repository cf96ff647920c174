use tokio::io::{AsyncBufReadExt, BufReader};

use visawatch_common::config::AppConfig;
use visawatch_common::types::AppointmentEvent;
use visawatch_notifier::{Dispatcher, RateLimiter, TelegramClient, Transport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visawatch_notifier=info,visawatch_common=info".into()),
        )
        .json()
        .init();

    tracing::info!("VisaWatch Notifier starting...");

    // Load configuration
    let config = AppConfig::from_env()?;

    let limiter = RateLimiter::new(config.rate_limit_per_minute)?;
    let transport = TelegramClient::new(config.telegram_bot_token.clone());
    let dispatcher = Dispatcher::new(
        transport,
        limiter,
        config.telegram_chat_id.clone(),
        config.timezone,
        config.max_throttle_retries,
    );

    tracing::info!(
        rate_limit = config.rate_limit_per_minute,
        timezone = %config.timezone,
        "Dispatcher ready, reading events from stdin"
    );

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = run(&dispatcher) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Event loop exited with error");
                dispatcher.shutdown();
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    dispatcher.shutdown();
    tracing::info!("VisaWatch Notifier stopped.");
    Ok(())
}

/// Consume JSON-lines appointment events from stdin until EOF.
async fn run<T: Transport>(dispatcher: &Dispatcher<T>) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        // Malformed lines are upstream producer bugs, not delivery
        // failures — log and keep consuming.
        let event: AppointmentEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = %e, "Skipping malformed event line");
                continue;
            }
        };

        if !dispatcher.notify(&event).await {
            tracing::warn!(center = %event.center, "Notification was not delivered");
        }
    }

    tracing::info!("Input stream closed");
    Ok(())
}
