//! Core domain types for the token mood bot.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `Mood`: the eight-bucket classification of a percent price change
//! - `Phase`: the operating phase tied to one price source
//! - `PriceSample`: an immutable price/market-cap observation
//! - Migration policy deciding the one-shot Phase1 -> Phase2 handoff

pub mod mood;
pub mod phase;
pub mod sample;

pub use mood::Mood;
pub use phase::{should_migrate, Phase, MIGRATION_THRESHOLD_SOL};
pub use sample::{PriceSample, FIRST_SAMPLE_CHANGE_PCT};
