//! Main orchestration loop.
//!
//! One cooperative loop, one active tracker. Per tick: poll the active
//! source, run the migration check (Phase1 only), classify the change and
//! dispatch content, then sleep the active interval. Migration pre-empts
//! dispatch for its triggering sample. No tick error is fatal; unexpected
//! failures swap the sleep for a short error backoff and the loop carries
//! on until an external stop.

use crate::config::AppConfig;
use crate::error::AppResult;
use mood_content::{
    CaptionWriter, ContentPipeline, GenerationPipeline, ImageStudio, Publisher,
};
use mood_core::{should_migrate, Mood, Phase};
use mood_feed::{PhaseTracker, PollingSource, StreamingSource};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// What one tick of the loop did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A sample was classified and dispatched.
    Dispatched(Mood),
    /// A sample was classified but the content pipeline failed; the failure
    /// was logged and absorbed.
    DispatchFailed(Mood),
    /// The migration threshold was crossed; the tracker was swapped and
    /// dispatch was skipped for the triggering sample.
    Migrated,
    /// The source had no usable sample this attempt.
    Unavailable,
}

/// Main application.
pub struct Application {
    config: AppConfig,
    phase: Phase,
    tracker: PhaseTracker,
    pipeline: Arc<dyn ContentPipeline>,
    shutdown: CancellationToken,
}

impl Application {
    /// Build the application in its initial state: Phase1 streaming tracker
    /// and the production content pipeline.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let tracker = PhaseTracker::new(
            Phase::Streaming,
            Box::new(StreamingSource::new(config.streaming_config())),
            config.stream_interval(),
        );

        let pipeline = GenerationPipeline::new(
            CaptionWriter::new(config.caption_config())?,
            ImageStudio::new(config.image_config())?,
            Publisher::new(config.publisher_config())?,
        );

        Ok(Self::with_parts(config, tracker, Arc::new(pipeline)))
    }

    /// Assemble from explicit parts. Used by tests and the isolated-phase
    /// CLI probes.
    pub fn with_parts(
        config: AppConfig,
        tracker: PhaseTracker,
        pipeline: Arc<dyn ContentPipeline>,
    ) -> Self {
        let phase = tracker.phase();
        Self {
            config,
            phase,
            tracker,
            pipeline,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops the run loop at the next iteration boundary.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the loop until the shutdown token fires.
    pub async fn run(mut self) -> AppResult<()> {
        info!(phase = %self.phase, interval_secs = self.tracker.interval().as_secs(), "Starting run loop");

        let shutdown = self.shutdown.clone();
        loop {
            // Cancellation is checked before fetch and before sleep so
            // shutdown never waits out a full interval.
            let result = tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                result = self.step() => result,
            };
            let delay = self.delay_for(&result);

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        info!("Shutdown requested, closing feed");
        self.tracker.close().await;
        Ok(())
    }

    /// Execute one tick: fetch, migration check, classify, dispatch.
    pub async fn step(&mut self) -> AppResult<TickOutcome> {
        let sample = match self.tracker.poll().await? {
            Some(sample) => sample,
            None => {
                // Handled unavailability keeps the normal interval; the
                // error backoff is reserved for unexpected failures.
                info!(phase = %self.phase, "No sample this tick");
                return Ok(TickOutcome::Unavailable);
            }
        };

        info!(
            phase = %self.phase,
            value = sample.value,
            change_pct = sample.change_pct,
            "Sample taken"
        );

        if self.phase == Phase::Streaming && should_migrate(sample.value) {
            self.migrate().await;
            return Ok(TickOutcome::Migrated);
        }

        let mood = Mood::classify(sample.change_pct);
        match self.pipeline.dispatch(mood, sample.change_pct).await {
            Ok(()) => Ok(TickOutcome::Dispatched(mood)),
            Err(e) => {
                // Absorbed: no retry this tick, no effect on tracker state.
                warn!(%mood, error = %e, "Content dispatch failed");
                Ok(TickOutcome::DispatchFailed(mood))
            }
        }
    }

    /// Sleep to apply after a tick. Unexpected errors get the fixed
    /// backoff; everything else (including Unavailable) gets the active
    /// phase interval.
    pub fn delay_for(&self, result: &AppResult<TickOutcome>) -> Duration {
        match result {
            Ok(outcome) => {
                info!(?outcome, phase = %self.phase, "Tick complete");
                self.tracker.interval()
            }
            Err(e) => {
                error!(error = %e, backoff_secs = self.config.error_backoff().as_secs(), "Tick failed");
                self.config.error_backoff()
            }
        }
    }

    /// One-shot Phase1 -> Phase2 handoff: swap tracker and interval, close
    /// the streaming connection, start a fresh baseline.
    async fn migrate(&mut self) {
        info!(
            threshold = mood_core::MIGRATION_THRESHOLD_SOL,
            "Migration threshold crossed, switching to market-data polling"
        );

        let polling = match PollingSource::new(self.config.polling_config()) {
            Ok(source) => source,
            Err(e) => {
                // Client construction only fails on misconfiguration, which
                // load() already validated. Stay on Phase1 rather than die.
                error!(error = %e, "Polling source construction failed, staying on Phase1");
                return;
            }
        };

        let mut old = std::mem::replace(
            &mut self.tracker,
            PhaseTracker::new(Phase::Polling, Box::new(polling), self.config.market_interval()),
        );
        old.close().await;
        self.phase = Phase::Polling;

        info!(
            phase = %self.phase,
            interval_secs = self.tracker.interval().as_secs(),
            "Migration complete"
        );
    }
}
