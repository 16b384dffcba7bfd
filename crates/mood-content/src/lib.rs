//! Content generation and publishing collaborators.
//!
//! Everything in this crate is an external request/response call with no
//! internal state machine: caption text generation, mood-keyed image
//! generation, and the publish step that uploads the image and posts the
//! pair. The orchestrator talks to them through the `ContentPipeline` seam.

pub mod caption;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod prompt;
pub mod publish;

pub use caption::{CaptionConfig, CaptionWriter};
pub use error::{ContentError, ContentResult};
pub use image::{ImageConfig, ImageStudio};
pub use pipeline::{ContentPipeline, GenerationPipeline};
pub use publish::{Publisher, PublisherConfig};
