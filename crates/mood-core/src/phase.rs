//! Operating phases and the migration policy.
//!
//! The bot starts on a low-liquidity streaming source (Phase1) and hands off
//! to a liquid market-data source (Phase2) once the token's market cap
//! crosses the migration threshold. The handoff is one-directional and
//! one-shot: the policy is never re-evaluated after migration.

use serde::{Deserialize, Serialize};

/// Market-cap threshold (SOL) at which Phase1 hands off to Phase2.
pub const MIGRATION_THRESHOLD_SOL: f64 = 420.0;

/// Operating phase. Exactly one phase is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Phase1: streaming subscription source, market-cap denominated.
    Streaming,
    /// Phase2: polling REST source, price denominated. Terminal.
    Polling,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Streaming => write!(f, "phase1-streaming"),
            Self::Polling => write!(f, "phase2-polling"),
        }
    }
}

/// Migration predicate over the latest Phase1 market-cap sample.
///
/// Inclusive at the threshold: exactly 420 SOL triggers migration.
#[must_use]
pub fn should_migrate(market_cap_sol: f64) -> bool {
    market_cap_sol >= MIGRATION_THRESHOLD_SOL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_stays() {
        assert!(!should_migrate(419.99));
        assert!(!should_migrate(0.0));
        assert!(!should_migrate(-1.0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(should_migrate(420.0));
    }

    #[test]
    fn test_above_threshold_migrates() {
        assert!(should_migrate(500.0));
        assert!(should_migrate(1_000_000.0));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Streaming.to_string(), "phase1-streaming");
        assert_eq!(Phase::Polling.to_string(), "phase2-polling");
    }
}
