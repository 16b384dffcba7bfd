//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(#[from] mood_feed::FeedError),

    #[error("Content error: {0}")]
    Content(#[from] mood_content::ContentError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] mood_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
