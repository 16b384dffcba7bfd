//! Token mood bot.
//!
//! Orchestrates the phased price-tracking loop:
//! - Phase1: streaming market-cap subscription until the migration threshold
//! - Phase2: polling market-data source, terminal
//! - per-sample mood classification and content dispatch

pub mod app;
pub mod config;
pub mod error;

pub use app::{Application, TickOutcome};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
