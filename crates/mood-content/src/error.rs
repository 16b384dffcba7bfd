//! Content pipeline error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ContentResult<T> = Result<T, ContentError>;
