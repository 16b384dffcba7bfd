//! Phase tracker: one source, one interval, one baseline.

use crate::error::FeedResult;
use crate::source::{Fetched, PriceSource};
use mood_core::{Phase, PriceSample};
use std::time::Duration;
use tracing::debug;

/// Wraps one price source with its fixed polling interval and owns the
/// last-sample state used for change computation.
///
/// Baselines never cross phases: a fresh tracker starts its own
/// change-tracking from its first sample.
pub struct PhaseTracker {
    phase: Phase,
    source: Box<dyn PriceSource>,
    interval: Duration,
    last_value: Option<f64>,
}

impl PhaseTracker {
    pub fn new(phase: Phase, source: Box<dyn PriceSource>, interval: Duration) -> Self {
        Self {
            phase,
            source,
            interval,
            last_value: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drive one fetch and turn the outcome into a sample.
    ///
    /// `None` means no usable sample this attempt (handled unavailability,
    /// never a fault); the caller decides retry pacing.
    pub async fn poll(&mut self) -> FeedResult<Option<PriceSample>> {
        match self.source.fetch().await? {
            Fetched::Unavailable => {
                debug!(phase = %self.phase, source = self.source.name(), "No sample this attempt");
                Ok(None)
            }
            Fetched::Value(value) => {
                let sample = PriceSample::against(value, self.last_value);
                self.last_value = Some(value);
                Ok(Some(sample))
            }
            Fetched::Quoted { value, change_pct } => {
                self.last_value = Some(value);
                Ok(Some(PriceSample::quoted(value, change_pct)))
            }
        }
    }

    /// Release the source's transport resource.
    pub async fn close(&mut self) {
        self.source.close().await;
    }
}

impl std::fmt::Debug for PhaseTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseTracker")
            .field("phase", &self.phase)
            .field("interval", &self.interval)
            .field("last_value", &self.last_value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use async_trait::async_trait;
    use mood_core::{Mood, FIRST_SAMPLE_CHANGE_PCT};

    /// Source that replays a fixed script of outcomes.
    struct ScriptedSource {
        script: Vec<FeedResult<Fetched>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<FeedResult<Fetched>>) -> Self {
            let mut script = script;
            script.reverse();
            Self { script }
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        async fn fetch(&mut self) -> FeedResult<Fetched> {
            self.script
                .pop()
                .unwrap_or(Err(FeedError::Transport("script exhausted".to_string())))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn streaming_tracker(script: Vec<FeedResult<Fetched>>) -> PhaseTracker {
        PhaseTracker::new(
            Phase::Streaming,
            Box::new(ScriptedSource::new(script)),
            Duration::from_secs(300),
        )
    }

    #[tokio::test]
    async fn test_first_poll_yields_placeholder_change() {
        let mut tracker = streaming_tracker(vec![Ok(Fetched::Value(100.0))]);
        let sample = tracker.poll().await.unwrap().unwrap();
        assert_eq!(sample.value, 100.0);
        assert_eq!(sample.change_pct, FIRST_SAMPLE_CHANGE_PCT);
    }

    #[tokio::test]
    async fn test_second_poll_computes_exact_change() {
        let mut tracker =
            streaming_tracker(vec![Ok(Fetched::Value(100.0)), Ok(Fetched::Value(250.0))]);
        tracker.poll().await.unwrap().unwrap();
        let sample = tracker.poll().await.unwrap().unwrap();
        assert_eq!(sample.change_pct, 150.0);
    }

    #[tokio::test]
    async fn test_launch_scenario_100_250_420() {
        // Market caps [100, 250, 420]: tick 2 is +150% (extreme-bullish),
        // tick 3 crosses the migration threshold.
        let mut tracker = streaming_tracker(vec![
            Ok(Fetched::Value(100.0)),
            Ok(Fetched::Value(250.0)),
            Ok(Fetched::Value(420.0)),
        ]);

        let first = tracker.poll().await.unwrap().unwrap();
        assert!(!mood_core::should_migrate(first.value));

        let second = tracker.poll().await.unwrap().unwrap();
        assert_eq!(second.change_pct, 150.0);
        assert_eq!(Mood::classify(second.change_pct), Mood::ExtremeBullish);
        assert!(!mood_core::should_migrate(second.value));

        let third = tracker.poll().await.unwrap().unwrap();
        assert!(mood_core::should_migrate(third.value));
    }

    #[tokio::test]
    async fn test_unavailable_does_not_disturb_baseline() {
        let mut tracker = streaming_tracker(vec![
            Ok(Fetched::Value(200.0)),
            Ok(Fetched::Unavailable),
            Ok(Fetched::Value(300.0)),
        ]);
        tracker.poll().await.unwrap().unwrap();
        assert!(tracker.poll().await.unwrap().is_none());
        // Change still computed against 200, not reset by the gap.
        let sample = tracker.poll().await.unwrap().unwrap();
        assert_eq!(sample.change_pct, 50.0);
    }

    #[tokio::test]
    async fn test_quoted_outcome_passes_upstream_change_through() {
        let mut tracker = PhaseTracker::new(
            Phase::Polling,
            Box::new(ScriptedSource::new(vec![Ok(Fetched::Quoted {
                value: 0.001,
                change_pct: -33.0,
            })])),
            Duration::from_secs(900),
        );
        let sample = tracker.poll().await.unwrap().unwrap();
        assert_eq!(sample.value, 0.001);
        assert_eq!(sample.change_pct, -33.0);
    }

    #[tokio::test]
    async fn test_fresh_tracker_starts_its_own_baseline() {
        // Phase2 starts change-tracking from scratch; nothing carries over
        // from a previous phase's numbers.
        let mut tracker = PhaseTracker::new(
            Phase::Polling,
            Box::new(ScriptedSource::new(vec![Ok(Fetched::Value(0.5))])),
            Duration::from_secs(900),
        );
        let sample = tracker.poll().await.unwrap().unwrap();
        assert_eq!(sample.change_pct, FIRST_SAMPLE_CHANGE_PCT);
    }
}
