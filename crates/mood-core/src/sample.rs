//! Price sample type and change computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder change for the first sample of a fresh tracker.
///
/// With no previous value there is no meaningful baseline; a fixed +1%
/// keeps the first tick out of the divide-by-zero path without producing
/// mood noise at the extremes.
pub const FIRST_SAMPLE_CHANGE_PCT: f64 = 1.0;

/// One immutable price (or market-cap) observation.
///
/// The unit of `value` depends on the active phase: market cap in SOL for
/// Phase1, USD price for Phase2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Observed value (price or market cap, phase-dependent unit).
    pub value: f64,
    /// Percent change relative to the previous sample from the same source.
    pub change_pct: f64,
    /// Observation time.
    pub observed_at: DateTime<Utc>,
}

impl PriceSample {
    /// Build a sample against an optional previous value from the same
    /// source instance.
    ///
    /// Without a baseline the change is the fixed first-sample placeholder,
    /// never a division fault.
    #[must_use]
    pub fn against(value: f64, previous: Option<f64>) -> Self {
        let change_pct = match previous {
            Some(prev) => (value - prev) / prev * 100.0,
            None => FIRST_SAMPLE_CHANGE_PCT,
        };
        Self {
            value,
            change_pct,
            observed_at: Utc::now(),
        }
    }

    /// Build a sample whose change figure was provided upstream.
    #[must_use]
    pub fn quoted(value: f64, change_pct: f64) -> Self {
        Self {
            value,
            change_pct,
            observed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_uses_placeholder_change() {
        let sample = PriceSample::against(100.0, None);
        assert_eq!(sample.change_pct, FIRST_SAMPLE_CHANGE_PCT);
        assert_eq!(sample.value, 100.0);
    }

    #[test]
    fn test_change_is_exact_against_previous() {
        let sample = PriceSample::against(250.0, Some(100.0));
        assert_eq!(sample.change_pct, 150.0);

        let down = PriceSample::against(40.0, Some(100.0));
        assert_eq!(down.change_pct, -60.0);
    }

    #[test]
    fn test_quoted_sample_trusts_upstream_change() {
        let sample = PriceSample::quoted(0.0042, -12.5);
        assert_eq!(sample.value, 0.0042);
        assert_eq!(sample.change_pct, -12.5);
    }
}
