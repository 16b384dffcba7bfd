//! Content pipeline seam between the orchestrator and the collaborators.

use crate::caption::CaptionWriter;
use crate::error::ContentResult;
use crate::image::ImageStudio;
use crate::publish::Publisher;
use async_trait::async_trait;
use mood_core::Mood;
use tracing::info;

/// What the orchestrator dispatches to on every successful sample.
///
/// Kept as a trait so the run loop can be tested against a mock.
#[async_trait]
pub trait ContentPipeline: Send + Sync {
    /// Generate and publish content for one classified sample.
    async fn dispatch(&self, mood: Mood, change_pct: f64) -> ContentResult<()>;
}

/// Production pipeline: caption -> image -> publish, sequentially.
pub struct GenerationPipeline {
    caption: CaptionWriter,
    images: ImageStudio,
    publisher: Publisher,
}

impl GenerationPipeline {
    pub fn new(caption: CaptionWriter, images: ImageStudio, publisher: Publisher) -> Self {
        Self {
            caption,
            images,
            publisher,
        }
    }
}

#[async_trait]
impl ContentPipeline for GenerationPipeline {
    async fn dispatch(&self, mood: Mood, change_pct: f64) -> ContentResult<()> {
        info!(%mood, change_pct, "Dispatching content pipeline");

        let caption = self.caption.write_caption(mood).await?;
        info!(caption = %caption, "Caption generated");

        let image_url = self.images.generate(mood).await?;
        self.publisher.publish(&caption, &image_url).await?;

        Ok(())
    }
}
