//! Mood classification from percent price change.
//!
//! The classifier is a total, pure function over `f64`. Thresholds are
//! right-open intervals tested in descending priority order with strict `>`,
//! so boundary values (exactly 100, 50, 10, 0, -10, -50, -100) fall into the
//! lower-intensity bucket of the pair they straddle.

use serde::{Deserialize, Serialize};

/// Discrete emotional state derived from a percent price change.
///
/// Ordered from most bullish to most bearish. Derived per sample, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    /// change > 100%
    ExtremeBullish,
    /// 50% < change <= 100%
    StrongBullish,
    /// 10% < change <= 50%
    MildBullish,
    /// 0% < change <= 10%
    SlightlyBullish,
    /// -10% < change <= 0%
    SlightlyBearish,
    /// -50% < change <= -10%
    StrongBearish,
    /// -100% < change <= -50%
    SevereBearish,
    /// change <= -100%
    TotalCollapse,
}

impl Mood {
    /// All moods in classification order.
    pub const ALL: [Mood; 8] = [
        Mood::ExtremeBullish,
        Mood::StrongBullish,
        Mood::MildBullish,
        Mood::SlightlyBullish,
        Mood::SlightlyBearish,
        Mood::StrongBearish,
        Mood::SevereBearish,
        Mood::TotalCollapse,
    ];

    /// Classify a percent price change into a mood bucket.
    ///
    /// First strict `>` match wins; `<= -100` falls through to
    /// `TotalCollapse`.
    #[must_use]
    pub fn classify(change_pct: f64) -> Self {
        if change_pct > 100.0 {
            Self::ExtremeBullish
        } else if change_pct > 50.0 {
            Self::StrongBullish
        } else if change_pct > 10.0 {
            Self::MildBullish
        } else if change_pct > 0.0 {
            Self::SlightlyBullish
        } else if change_pct > -10.0 {
            Self::SlightlyBearish
        } else if change_pct > -50.0 {
            Self::StrongBearish
        } else if change_pct > -100.0 {
            Self::SevereBearish
        } else {
            Self::TotalCollapse
        }
    }

    /// Returns true for any bucket representing a positive move.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        matches!(
            self,
            Self::ExtremeBullish | Self::StrongBullish | Self::MildBullish | Self::SlightlyBullish
        )
    }

    /// Stable kebab-case label, matching the serde representation.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ExtremeBullish => "extreme-bullish",
            Self::StrongBullish => "strong-bullish",
            Self::MildBullish => "mild-bullish",
            Self::SlightlyBullish => "slightly-bullish",
            Self::SlightlyBearish => "slightly-bearish",
            Self::StrongBearish => "strong-bearish",
            Self::SevereBearish => "severe-bearish",
            Self::TotalCollapse => "total-collapse",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_upper_buckets() {
        assert_eq!(Mood::classify(250.0), Mood::ExtremeBullish);
        assert_eq!(Mood::classify(100.1), Mood::ExtremeBullish);
        assert_eq!(Mood::classify(75.0), Mood::StrongBullish);
        assert_eq!(Mood::classify(25.0), Mood::MildBullish);
        assert_eq!(Mood::classify(5.0), Mood::SlightlyBullish);
    }

    #[test]
    fn test_classify_lower_buckets() {
        assert_eq!(Mood::classify(-5.0), Mood::SlightlyBearish);
        assert_eq!(Mood::classify(-25.0), Mood::StrongBearish);
        assert_eq!(Mood::classify(-75.0), Mood::SevereBearish);
        assert_eq!(Mood::classify(-150.0), Mood::TotalCollapse);
    }

    #[test]
    fn test_boundary_values_map_to_lower_intensity_bucket() {
        // Strict > means exact boundaries land in the weaker bucket.
        assert_eq!(Mood::classify(100.0), Mood::StrongBullish);
        assert_eq!(Mood::classify(50.0), Mood::MildBullish);
        assert_eq!(Mood::classify(10.0), Mood::SlightlyBullish);
        assert_eq!(Mood::classify(0.0), Mood::SlightlyBearish);
        assert_eq!(Mood::classify(-10.0), Mood::StrongBearish);
        assert_eq!(Mood::classify(-50.0), Mood::SevereBearish);
        assert_eq!(Mood::classify(-100.0), Mood::TotalCollapse);
    }

    #[test]
    fn test_classify_is_pure() {
        for change in [-123.4, -50.0, 0.0, 0.0001, 99.99] {
            assert_eq!(Mood::classify(change), Mood::classify(change));
        }
    }

    #[test]
    fn test_classify_total_over_extremes() {
        assert_eq!(Mood::classify(f64::INFINITY), Mood::ExtremeBullish);
        assert_eq!(Mood::classify(f64::NEG_INFINITY), Mood::TotalCollapse);
        // NaN fails every strict > comparison and falls through.
        assert_eq!(Mood::classify(f64::NAN), Mood::TotalCollapse);
    }

    #[test]
    fn test_labels_are_kebab_case() {
        for mood in Mood::ALL {
            assert!(!mood.label().is_empty());
            assert!(mood.label().chars().all(|c| c.is_ascii_lowercase() || c == '-'));
        }
    }

    #[test]
    fn test_serde_label_roundtrip() {
        let json = serde_json::to_string(&Mood::StrongBearish).unwrap();
        assert_eq!(json, "\"strong-bearish\"");
        let back: Mood = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Mood::StrongBearish);
    }
}
