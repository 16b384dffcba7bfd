//! Price sources and phase tracking.
//!
//! Two source variants feed the bot in sequence:
//! - `StreamingSource`: long-lived websocket subscription, market-cap
//!   denominated, change computed locally against the previous sample
//! - `PollingSource`: per-fetch REST request, price denominated, change
//!   figure trusted from upstream
//!
//! `PhaseTracker` wraps one source with its polling interval and owns the
//! last-sample state.

pub mod error;
pub mod polling;
pub mod source;
pub mod streaming;
pub mod tracker;

pub use error::{FeedError, FeedResult};
pub use polling::{PollingConfig, PollingSource};
pub use source::{Fetched, PriceSource};
pub use streaming::{StreamingConfig, StreamingSource};
pub use tracker::PhaseTracker;
