//! Phase1 streaming source.
//!
//! Maintains a long-lived websocket subscription to the launchpad trade
//! feed. A fetch suspends until the next trade event arrives, then reads
//! the market-cap field from it. Any transport failure invalidates the
//! connection handle so the next fetch retries the handshake from scratch.

use crate::error::FeedResult;
use crate::source::{Fetched, PriceSource};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Subscription request sent after connecting.
#[derive(Debug, Serialize)]
struct SubscribeRequest {
    method: String,
    keys: Vec<String>,
}

impl SubscribeRequest {
    fn token_trades(token_id: &str) -> Self {
        Self {
            method: "subscribeTokenTrade".to_string(),
            keys: vec![token_id.to_string()],
        }
    }
}

/// Streaming source configuration.
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Websocket endpoint URL.
    pub ws_url: String,
    /// Token identifier keyed in the subscription request.
    pub token_id: String,
}

/// Phase1 price source: websocket trade-event subscription.
///
/// The connection handle is owned exclusively by this source and never
/// shared. It is recreated on failure and explicitly closed on shutdown.
pub struct StreamingSource {
    config: StreamingConfig,
    conn: Option<WsStream>,
}

impl StreamingSource {
    pub fn new(config: StreamingConfig) -> Self {
        Self { config, conn: None }
    }

    /// Connect and run the subscribe handshake: open the socket, send the
    /// subscription request, await and discard one confirmation message.
    async fn handshake(&mut self) -> FeedResult<()> {
        info!(url = %self.config.ws_url, "Connecting to trade stream");
        let (mut ws, _response) = connect_async(&self.config.ws_url).await?;

        let request = SubscribeRequest::token_trades(&self.config.token_id);
        let payload = serde_json::to_string(&request)?;
        ws.send(Message::Text(payload)).await?;

        // The server acknowledges the subscription with one message before
        // trade events start flowing. Discard it.
        match ws.next().await {
            Some(Ok(msg)) => {
                debug!(?msg, "Discarded subscription confirmation");
            }
            Some(Err(e)) => return Err(e.into()),
            None => {
                return Err(crate::error::FeedError::Transport(
                    "stream closed during subscribe handshake".to_string(),
                ))
            }
        }

        info!(token = %self.config.token_id, "Subscribed to token trades");
        self.conn = Some(ws);
        Ok(())
    }

    /// Drop the connection handle so the next fetch re-handshakes.
    fn invalidate(&mut self) {
        self.conn = None;
    }
}

#[async_trait]
impl PriceSource for StreamingSource {
    async fn fetch(&mut self) -> FeedResult<Fetched> {
        if self.conn.is_none() {
            if let Err(e) = self.handshake().await {
                warn!(error = %e, "Stream handshake failed");
                self.invalidate();
                return Ok(Fetched::Unavailable);
            }
        }

        // Take ownership for the read; the handle goes back only if the
        // connection is still healthy, so a failure path leaves the next
        // fetch to re-handshake.
        let Some(mut ws) = self.conn.take() else {
            return Ok(Fetched::Unavailable);
        };

        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    self.conn = Some(ws);
                    return Ok(parse_trade_event(&text));
                }
                Some(Ok(Message::Ping(data))) => {
                    if let Err(e) = ws.send(Message::Pong(data)).await {
                        warn!(error = %e, "Pong send failed");
                        return Ok(Fetched::Unavailable);
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    warn!(?frame, "Trade stream closed by server");
                    return Ok(Fetched::Unavailable);
                }
                Some(Ok(_)) => {
                    // Binary/pong frames carry no trade data.
                    continue;
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Trade stream read error");
                    return Ok(Fetched::Unavailable);
                }
                None => {
                    warn!("Trade stream ended");
                    return Ok(Fetched::Unavailable);
                }
            }
        }
    }

    async fn close(&mut self) {
        if let Some(mut ws) = self.conn.take() {
            if let Err(e) = ws.send(Message::Close(None)).await {
                debug!(error = %e, "Close frame send failed during shutdown");
            }
            info!("Trade stream closed");
        }
    }

    fn name(&self) -> &'static str {
        "streaming"
    }
}

/// Parse one trade-event message, reading the market-cap field.
///
/// Absence of the field (or an unparseable payload) is not an error: the
/// message simply carries no usable sample.
fn parse_trade_event(text: &str) -> Fetched {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        debug!("Trade event was not valid JSON");
        return Fetched::Unavailable;
    };

    match extract_market_cap(&value) {
        Some(market_cap) => Fetched::Value(market_cap),
        None => {
            debug!("Trade event without market-cap field");
            Fetched::Unavailable
        }
    }
}

/// Read `marketCapSol` from a trade event. The feed sends it as a number,
/// but string-encoded numerics are accepted too.
fn extract_market_cap(event: &serde_json::Value) -> Option<f64> {
    let field = event.get("marketCapSol")?;
    field
        .as_f64()
        .or_else(|| field.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscribe_request_wire_format() {
        let request = SubscribeRequest::token_trades("TOKEN123");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"method":"subscribeTokenTrade","keys":["TOKEN123"]}"#
        );
    }

    #[test]
    fn test_parse_trade_event_with_market_cap() {
        let text = json!({
            "txType": "buy",
            "marketCapSol": 137.5,
            "tokenAmount": 1000.0
        })
        .to_string();
        assert_eq!(parse_trade_event(&text), Fetched::Value(137.5));
    }

    #[test]
    fn test_parse_trade_event_string_encoded_market_cap() {
        let text = json!({ "marketCapSol": "420.25" }).to_string();
        assert_eq!(parse_trade_event(&text), Fetched::Value(420.25));
    }

    #[test]
    fn test_missing_market_cap_is_unavailable_not_error() {
        let text = json!({ "txType": "sell", "tokenAmount": 5.0 }).to_string();
        assert_eq!(parse_trade_event(&text), Fetched::Unavailable);
    }

    #[test]
    fn test_malformed_payload_is_unavailable() {
        assert_eq!(parse_trade_event("not json at all"), Fetched::Unavailable);
        assert_eq!(
            parse_trade_event(r#"{"marketCapSol": "garbage"}"#),
            Fetched::Unavailable
        );
    }
}
