//! Structured logging for the token mood bot.
//!
//! The bot's only user-visible failure surface is its logs; every absorbed
//! error and skipped tick leaves a diagnostic here.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
