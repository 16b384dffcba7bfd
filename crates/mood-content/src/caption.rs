//! Caption text generation.
//!
//! One chat-completion request per tick: a system message carrying the
//! persona and a user message carrying the rendered mood prompt. Any
//! enclosing quote characters are stripped from the reply before use.

use crate::error::{ContentError, ContentResult};
use crate::prompt::{caption_prompt, caption_system_prompt};
use mood_core::Mood;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Caption generation configuration.
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    /// Chat-completions endpoint URL.
    pub api_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Reply token budget.
    pub max_tokens: u32,
    /// Sampling temperature; high on purpose, the persona is erratic.
    pub temperature: f64,
    /// Token ticker the persona speaks as.
    pub token_symbol: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

/// Text-generation collaborator.
pub struct CaptionWriter {
    client: Client,
    config: CaptionConfig,
}

impl CaptionWriter {
    pub fn new(config: CaptionConfig) -> ContentResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ContentError::InvalidConfig(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client, config })
    }

    /// Generate a caption for the given mood.
    pub async fn write_caption(&self, mood: Mood) -> ContentResult<String> {
        let system = caption_system_prompt(&self.config.token_symbol);
        let user = caption_prompt(mood, &self.config.token_symbol);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(%mood, model = %self.config.model, "Requesting caption");

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
                "caption endpoint returned HTTP {status}: {body}"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let content = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or(ContentError::EmptyResponse("caption endpoint"))?;

        let caption = strip_quotes(content);
        if caption.is_empty() {
            return Err(ContentError::EmptyResponse("caption endpoint"));
        }
        Ok(caption)
    }
}

/// Trim whitespace and any enclosing quote characters from a model reply.
fn strip_quotes(text: &str) -> String {
    text.trim().trim_matches(['"', '\'']).trim().to_string()
}
