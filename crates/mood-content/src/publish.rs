//! Publishing collaborator.
//!
//! Downloads the generated image to a scoped temp file, uploads it to the
//! media endpoint, then posts caption + media id. The temp artifact is
//! removed on every exit path via its drop guard.

use crate::error::{ContentError, ContentResult};
use chrono::Utc;
use reqwest::multipart;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Publisher configuration.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Media upload endpoint URL.
    pub media_upload_url: String,
    /// Post creation endpoint URL.
    pub post_url: String,
    /// Bearer access token.
    pub access_token: String,
}

/// Scoped temp file removed when the guard drops.
struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    fn create(bytes: &[u8]) -> ContentResult<Self> {
        let path = std::env::temp_dir().join(format!(
            "mood-post-{}.png",
            Utc::now().timestamp_millis()
        ));
        std::fs::write(&path, bytes)?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Temp image cleanup failed");
        }
    }
}

/// Publishing collaborator: fetches the image and publishes one post
/// containing caption and media.
pub struct Publisher {
    client: Client,
    config: PublisherConfig,
}

impl Publisher {
    pub fn new(config: PublisherConfig) -> ContentResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ContentError::InvalidConfig(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client, config })
    }

    /// Publish one post with the caption and the image at `image_url`.
    pub async fn publish(&self, caption: &str, image_url: &str) -> ContentResult<()> {
        let image = self.client.get(image_url).send().await?;
        if !image.status().is_success() {
            return Err(ContentError::Publish(format!(
                "image download returned HTTP {}",
                image.status()
            )));
        }
        let bytes = image.bytes().await?;

        // Guard lives for the whole upload; removal happens on every path.
        let artifact = TempArtifact::create(&bytes)?;
        debug!(path = %artifact.path().display(), "Image staged for upload");

        let media_id = self.upload_media(artifact.path()).await?;
        self.create_post(caption, &media_id).await?;

        info!(media_id = %media_id, "Post published");
        Ok(())
    }

    async fn upload_media(&self, path: &Path) -> ContentResult<String> {
        let bytes = tokio::fs::read(path).await?;
        let part = multipart::Part::bytes(bytes)
            .file_name("mood.png")
            .mime_str("image/png")
            .map_err(|e| ContentError::Publish(format!("bad media part: {e}")))?;
        let form = multipart::Form::new().part("media", part);

        let response = self
            .client
            .post(&self.config.media_upload_url)
            .bearer_auth(&self.config.access_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Publish(format!(
                "media upload returned HTTP {status}: {body}"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        body.get("media_id_string")
            .or_else(|| body.get("media_id"))
            .and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or(ContentError::EmptyResponse("media upload"))
    }

    async fn create_post(&self, caption: &str, media_id: &str) -> ContentResult<()> {
        let payload = serde_json::json!({
            "text": caption,
            "media": { "media_ids": [media_id] }
        });

        let response = self
            .client
            .post(&self.config.post_url)
            .bearer_auth(&self.config.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Publish(format!(
                "post creation returned HTTP {status}: {body}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_artifact_removed_on_drop() {
        let path = {
            let artifact = TempArtifact::create(b"png bytes").unwrap();
            assert!(artifact.path().exists());
            artifact.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_artifact_holds_written_bytes() {
        let artifact = TempArtifact::create(b"abc").unwrap();
        let read = std::fs::read(artifact.path()).unwrap();
        assert_eq!(read, b"abc");
    }
}
