use thiserror::Error;

/// Common error types used across the application.
///
/// Delivery-time failures have their own taxonomy at the transport seam;
/// this covers construction-time problems that must fail fast.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
}
