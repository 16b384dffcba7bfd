//! Application configuration.
//!
//! Endpoints and intervals come from a TOML file with serde defaults;
//! credentials are read from the environment exactly once at startup and
//! carried in an explicit struct. Nothing in the core loop does ambient
//! lookups.

use crate::error::{AppError, AppResult};
use mood_content::{CaptionConfig, ImageConfig, PublisherConfig};
use mood_feed::{PollingConfig, StreamingConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Backoff applied after an unexpected tick error, instead of the phase
/// interval.
fn default_error_backoff_secs() -> u64 {
    60
}

/// Phase1 streaming feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Websocket endpoint for the launchpad trade feed.
    #[serde(default = "default_stream_ws_url")]
    pub ws_url: String,
    /// Phase1 polling interval (seconds).
    #[serde(default = "default_stream_interval_secs")]
    pub interval_secs: u64,
}

fn default_stream_ws_url() -> String {
    "wss://pumpportal.fun/api/data".to_string()
}

fn default_stream_interval_secs() -> u64 {
    300
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            ws_url: default_stream_ws_url(),
            interval_secs: default_stream_interval_secs(),
        }
    }
}

/// Phase2 market-data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Token endpoint base URL.
    #[serde(default = "default_market_api_url")]
    pub api_url: String,
    /// Phase2 polling interval (seconds).
    #[serde(default = "default_market_interval_secs")]
    pub interval_secs: u64,
}

fn default_market_api_url() -> String {
    "https://api.dexscreener.com/latest/dex/tokens".to_string()
}

fn default_market_interval_secs() -> u64 {
    900
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_url: default_market_api_url(),
            interval_secs: default_market_interval_secs(),
        }
    }
}

/// Caption model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionModelConfig {
    #[serde(default = "default_caption_api_url")]
    pub api_url: String,
    #[serde(default = "default_caption_model")]
    pub model: String,
    #[serde(default = "default_caption_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_caption_temperature")]
    pub temperature: f64,
}

fn default_caption_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_caption_model() -> String {
    "gpt-4".to_string()
}

fn default_caption_max_tokens() -> u32 {
    100
}

fn default_caption_temperature() -> f64 {
    0.9
}

impl Default for CaptionModelConfig {
    fn default() -> Self {
        Self {
            api_url: default_caption_api_url(),
            model: default_caption_model(),
            max_tokens: default_caption_max_tokens(),
            temperature: default_caption_temperature(),
        }
    }
}

/// Image model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageModelConfig {
    #[serde(default = "default_image_api_url")]
    pub api_url: String,
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_size")]
    pub size: String,
}

fn default_image_api_url() -> String {
    "https://api.openai.com/v1/images/generations".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

impl Default for ImageModelConfig {
    fn default() -> Self {
        Self {
            api_url: default_image_api_url(),
            model: default_image_model(),
            size: default_image_size(),
        }
    }
}

/// Publishing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub media_upload_url: String,
    #[serde(default)]
    pub post_url: String,
}

/// Credentials, sourced from the environment once at startup.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Key for caption and image generation.
    pub generation_api_key: String,
    /// Access token for the publishing endpoints.
    pub publish_token: String,
}

impl Credentials {
    /// Read credentials from `MOOD_GENERATION_API_KEY` and
    /// `MOOD_PUBLISH_TOKEN`. Missing variables are fatal at construction
    /// time, matching the rest of the misconfiguration policy.
    pub fn from_env() -> AppResult<Self> {
        let generation_api_key = std::env::var("MOOD_GENERATION_API_KEY")
            .map_err(|_| AppError::Config("MOOD_GENERATION_API_KEY not set".to_string()))?;
        let publish_token = std::env::var("MOOD_PUBLISH_TOKEN")
            .map_err(|_| AppError::Config("MOOD_PUBLISH_TOKEN not set".to_string()))?;
        Ok(Self {
            generation_api_key,
            publish_token,
        })
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token identifier used by both data sources.
    pub token_id: String,
    /// Ticker the persona speaks as.
    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,
    /// Error backoff (seconds) after an unexpected tick failure.
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub caption: CaptionModelConfig,
    #[serde(default)]
    pub image: ImageModelConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    /// Filled from the environment, never from the config file.
    #[serde(skip)]
    pub credentials: Credentials,
}

fn default_token_symbol() -> String {
    "$MOOD".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token_id: String::new(),
            token_symbol: default_token_symbol(),
            error_backoff_secs: default_error_backoff_secs(),
            stream: StreamConfig::default(),
            market: MarketConfig::default(),
            caption: CaptionModelConfig::default(),
            image: ImageModelConfig::default(),
            publish: PublishConfig::default(),
            credentials: Credentials::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, resolving the path from `MOOD_CONFIG` when no
    /// explicit path is given, and attach environment credentials.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let config_path = path
            .map(str::to_string)
            .or_else(|| std::env::var("MOOD_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        config.credentials = Credentials::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file, without credentials.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    fn validate(&self) -> AppResult<()> {
        if self.token_id.is_empty() {
            return Err(AppError::Config("token_id must be set".to_string()));
        }
        Ok(())
    }

    pub fn stream_interval(&self) -> Duration {
        Duration::from_secs(self.stream.interval_secs)
    }

    pub fn market_interval(&self) -> Duration {
        Duration::from_secs(self.market.interval_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    /// Phase1 source configuration.
    pub fn streaming_config(&self) -> StreamingConfig {
        StreamingConfig {
            ws_url: self.stream.ws_url.clone(),
            token_id: self.token_id.clone(),
        }
    }

    /// Phase2 source configuration.
    pub fn polling_config(&self) -> PollingConfig {
        PollingConfig {
            api_url: self.market.api_url.clone(),
            token_id: self.token_id.clone(),
        }
    }

    pub fn caption_config(&self) -> CaptionConfig {
        CaptionConfig {
            api_url: self.caption.api_url.clone(),
            api_key: self.credentials.generation_api_key.clone(),
            model: self.caption.model.clone(),
            max_tokens: self.caption.max_tokens,
            temperature: self.caption.temperature,
            token_symbol: self.token_symbol.clone(),
        }
    }

    pub fn image_config(&self) -> ImageConfig {
        ImageConfig {
            api_url: self.image.api_url.clone(),
            api_key: self.credentials.generation_api_key.clone(),
            model: self.image.model.clone(),
            size: self.image.size.clone(),
        }
    }

    pub fn publisher_config(&self) -> PublisherConfig {
        PublisherConfig {
            media_upload_url: self.publish.media_upload_url.clone(),
            post_url: self.publish.post_url.clone(),
            access_token: self.credentials.publish_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals_match_phase_policy() {
        let config = AppConfig::default();
        assert_eq!(config.stream_interval(), Duration::from_secs(300));
        assert_eq!(config.market_interval(), Duration::from_secs(900));
        assert_eq!(config.error_backoff(), Duration::from_secs(60));
    }

    #[test]
    fn test_minimal_toml_parses_with_defaults() {
        let config: AppConfig = toml::from_str(r#"token_id = "TOKEN123""#).unwrap();
        assert_eq!(config.token_id, "TOKEN123");
        assert_eq!(config.token_symbol, "$MOOD");
        assert_eq!(config.stream.interval_secs, 300);
        assert_eq!(config.caption.model, "gpt-4");
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            token_id = "TOKEN123"
            error_backoff_secs = 5

            [market]
            interval_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.error_backoff(), Duration::from_secs(5));
        assert_eq!(config.market_interval(), Duration::from_secs(60));
        // Untouched sections keep their defaults.
        assert_eq!(config.stream.interval_secs, 300);
    }

    #[test]
    fn test_empty_token_id_fails_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_configs_share_token_id() {
        let mut config = AppConfig::default();
        config.token_id = "TOKEN123".to_string();
        assert_eq!(config.streaming_config().token_id, "TOKEN123");
        assert_eq!(config.polling_config().token_id, "TOKEN123");
    }
}
