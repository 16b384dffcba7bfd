//! Phase2 polling source.
//!
//! Stateless transport-wise: each fetch issues one GET against a
//! DexScreener-style token endpoint and reads price plus the endpoint's own
//! 1-hour change figure from the first trading pair. This source does not
//! compute change from history, a deliberate asymmetry from the streaming
//! source.

use crate::error::{FeedError, FeedResult};
use crate::source::{Fetched, PriceSource};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for market-data requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Polling source configuration.
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Base URL of the token endpoint, e.g.
    /// `https://api.dexscreener.com/latest/dex/tokens`.
    pub api_url: String,
    /// Token identifier appended to the endpoint path.
    pub token_id: String,
}

/// Phase2 price source: per-fetch REST request.
pub struct PollingSource {
    client: Client,
    config: PollingConfig,
}

impl PollingSource {
    /// Create a new polling source. Client construction failure is the only
    /// fatal error; everything at fetch time degrades to `Unavailable`.
    pub fn new(config: PollingConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| FeedError::InvalidConfig(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.token_id
        )
    }
}

#[async_trait]
impl PriceSource for PollingSource {
    async fn fetch(&mut self) -> FeedResult<Fetched> {
        let url = self.endpoint();
        debug!(url = %url, "Polling market data");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Market data request failed");
                return Ok(Fetched::Unavailable);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Market data endpoint returned non-success");
            return Ok(Fetched::Unavailable);
        }

        let body: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Market data response was not valid JSON");
                return Ok(Fetched::Unavailable);
            }
        };

        match parse_pairs_response(&body) {
            Some((price, change_pct)) => Ok(Fetched::Quoted {
                value: price,
                change_pct,
            }),
            None => {
                warn!("Market data response missing pairs or price fields");
                Ok(Fetched::Unavailable)
            }
        }
    }

    fn name(&self) -> &'static str {
        "polling"
    }
}

/// Read `pairs[0].priceUsd` and `pairs[0].priceChange.h1` from a token
/// response. Returns `None` on an empty or malformed body.
fn parse_pairs_response(body: &serde_json::Value) -> Option<(f64, f64)> {
    let pair = body.get("pairs")?.as_array()?.first()?;

    let price = number_field(pair.get("priceUsd")?)?;
    let change_pct = number_field(pair.get("priceChange")?.get("h1")?)?;

    Some((price, change_pct))
}

/// DexScreener sends prices as strings and change figures as numbers;
/// accept either encoding.
fn number_field(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_response() -> serde_json::Value {
        json!({
            "schemaVersion": "1.0.0",
            "pairs": [
                {
                    "chainId": "solana",
                    "priceUsd": "0.0004213",
                    "priceChange": { "m5": 0.1, "h1": -12.4, "h24": 3.0 }
                },
                {
                    "chainId": "solana",
                    "priceUsd": "0.0004199",
                    "priceChange": { "h1": -11.0 }
                }
            ]
        })
    }

    #[test]
    fn test_parse_reads_first_pair_only() {
        let (price, change) = parse_pairs_response(&token_response()).unwrap();
        assert_eq!(price, 0.0004213);
        assert_eq!(change, -12.4);
    }

    #[test]
    fn test_missing_pairs_is_none() {
        assert!(parse_pairs_response(&json!({ "schemaVersion": "1.0.0" })).is_none());
        assert!(parse_pairs_response(&json!({ "pairs": [] })).is_none());
        assert!(parse_pairs_response(&json!({ "pairs": null })).is_none());
    }

    #[test]
    fn test_missing_price_fields_is_none() {
        let body = json!({ "pairs": [{ "priceUsd": "0.1" }] });
        assert!(parse_pairs_response(&body).is_none());

        let body = json!({ "pairs": [{ "priceChange": { "h1": 1.0 } }] });
        assert!(parse_pairs_response(&body).is_none());
    }

    #[test]
    fn test_numeric_price_encoding_accepted() {
        let body = json!({
            "pairs": [{ "priceUsd": 0.25, "priceChange": { "h1": "7.5" } }]
        });
        let (price, change) = parse_pairs_response(&body).unwrap();
        assert_eq!(price, 0.25);
        assert_eq!(change, 7.5);
    }

    #[test]
    fn test_endpoint_joins_token_id() {
        let source = PollingSource::new(PollingConfig {
            api_url: "https://api.dexscreener.com/latest/dex/tokens/".to_string(),
            token_id: "TOKEN123".to_string(),
        })
        .unwrap();
        assert_eq!(
            source.endpoint(),
            "https://api.dexscreener.com/latest/dex/tokens/TOKEN123"
        );
    }
}
