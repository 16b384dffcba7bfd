//! Token mood bot entry point.
//!
//! With no subcommand the orchestrator runs indefinitely. The subcommands
//! exercise individual pieces in isolation (a single phase's source, a
//! battery of representative change percentages, the per-mood image
//! prompts) without touching the run-loop state machine.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mood_bot::{AppConfig, Application};
use mood_content::{prompt, CaptionWriter, ImageStudio};
use mood_core::{Mood, Phase};
use mood_feed::{PhaseTracker, PollingSource, StreamingSource};
use tracing::info;

/// Representative change percentages, one per interesting regime.
const BATTERY: [(f64, &str); 7] = [
    (100.0, "strong-bullish boundary (exactly +100%)"),
    (50.0, "mild-bullish boundary (exactly +50%)"),
    (10.0, "slightly-bullish boundary (exactly +10%)"),
    (5.0, "small pump"),
    (-5.0, "small dip"),
    (-50.0, "severe-bearish boundary (exactly -50%)"),
    (-100.0, "total-collapse boundary (exactly -100%)"),
];

/// Token mood bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via MOOD_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify and render content for a fixed battery of change percentages
    Battery,
    /// Classify a single change percentage and render its content
    Classify {
        /// Percent change to classify (e.g. -12.5)
        change_pct: f64,
    },
    /// Generate every mood's image without touching price data
    Images,
    /// Run a single fetch against one phase's source in isolation
    Phase {
        /// Phase number: 1 (streaming) or 2 (polling)
        number: u8,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    mood_telemetry::init_logging()?;
    info!("Starting mood-bot v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(args.config.as_deref())?;
    info!(token = %config.token_id, symbol = %config.token_symbol, "Configuration loaded");

    match args.command {
        None => run(config).await,
        Some(Command::Battery) => battery(&config).await,
        Some(Command::Classify { change_pct }) => classify_one(&config, change_pct).await,
        Some(Command::Images) => images(&config).await,
        Some(Command::Phase { number }) => probe_phase(&config, number).await,
    }
}

/// Normal operation: run the orchestrator until ctrl-c.
async fn run(config: AppConfig) -> Result<()> {
    let app = Application::new(config)?;
    let shutdown = app.shutdown_token();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    app.run().await?;
    Ok(())
}

/// Render caption and image for one change percentage. Publishing is
/// deliberately left out of the probes.
async fn render_one(
    caption_writer: &CaptionWriter,
    image_studio: &ImageStudio,
    change_pct: f64,
) -> Result<()> {
    let mood = Mood::classify(change_pct);
    info!(change_pct, %mood, "Classified");

    let caption = caption_writer.write_caption(mood).await?;
    let image_url = image_studio.generate(mood).await?;
    info!(%mood, caption = %caption, image_url = %image_url, "Rendered");
    Ok(())
}

async fn battery(config: &AppConfig) -> Result<()> {
    let caption_writer = CaptionWriter::new(config.caption_config())?;
    let image_studio = ImageStudio::new(config.image_config())?;

    for (change_pct, description) in BATTERY {
        info!(change_pct, description, "Battery case");
        render_one(&caption_writer, &image_studio, change_pct).await?;
    }
    Ok(())
}

async fn classify_one(config: &AppConfig, change_pct: f64) -> Result<()> {
    let caption_writer = CaptionWriter::new(config.caption_config())?;
    let image_studio = ImageStudio::new(config.image_config())?;
    render_one(&caption_writer, &image_studio, change_pct).await
}

async fn images(config: &AppConfig) -> Result<()> {
    let image_studio = ImageStudio::new(config.image_config())?;
    for mood in Mood::ALL {
        info!(%mood, prompt = %prompt::image_prompt(mood), "Image prompt");
        let url = image_studio.generate(mood).await?;
        info!(%mood, url = %url, "Image generated");
    }
    Ok(())
}

/// Fetch once from a single phase's source and report the sample.
async fn probe_phase(config: &AppConfig, number: u8) -> Result<()> {
    let mut tracker = match number {
        1 => PhaseTracker::new(
            Phase::Streaming,
            Box::new(StreamingSource::new(config.streaming_config())),
            config.stream_interval(),
        ),
        2 => PhaseTracker::new(
            Phase::Polling,
            Box::new(PollingSource::new(config.polling_config())?),
            config.market_interval(),
        ),
        other => anyhow::bail!("unknown phase {other}, expected 1 or 2"),
    };

    match tracker.poll().await? {
        Some(sample) => info!(
            phase = %tracker.phase(),
            value = sample.value,
            change_pct = sample.change_pct,
            mood = %Mood::classify(sample.change_pct),
            "Probe sample"
        ),
        None => info!(phase = %tracker.phase(), "Probe returned no sample"),
    }

    tracker.close().await;
    Ok(())
}
