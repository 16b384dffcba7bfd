//! Mood-keyed image generation.

use crate::error::{ContentError, ContentResult};
use crate::prompt::image_prompt;
use mood_core::Mood;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

// Image models are slow; allow well beyond the chat timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Image generation configuration.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Image-generations endpoint URL.
    pub api_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Output dimensions, e.g. "1024x1024".
    pub size: String,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'static str,
    n: u8,
}

/// Image-generation collaborator. Returns a retrievable image URL.
pub struct ImageStudio {
    client: Client,
    config: ImageConfig,
}

impl ImageStudio {
    pub fn new(config: ImageConfig) -> ContentResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ContentError::InvalidConfig(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client, config })
    }

    /// Generate the mood's scene image and return its URL.
    pub async fn generate(&self, mood: Mood) -> ContentResult<String> {
        let prompt = image_prompt(mood);
        let request = ImageRequest {
            model: &self.config.model,
            prompt: &prompt,
            size: &self.config.size,
            quality: "standard",
            n: 1,
        };

        debug!(%mood, model = %self.config.model, "Requesting image");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Generation(format!(
                "image endpoint returned HTTP {status}: {body}"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let url = body
            .get("data")
            .and_then(|d| d.get(0))
            .and_then(|d| d.get("url"))
            .and_then(|u| u.as_str())
            .ok_or(ContentError::EmptyResponse("image endpoint"))?;

        info!(%mood, url = %url, "Image generated");
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_wire_format() {
        let request = ImageRequest {
            model: "dall-e-3",
            prompt: "a robot",
            size: "1024x1024",
            quality: "standard",
            n: 1,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "dall-e-3");
        assert_eq!(json["size"], "1024x1024");
        assert_eq!(json["n"], 1);
    }
}
