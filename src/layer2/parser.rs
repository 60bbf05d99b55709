// Frame Parser - Coinbase matches channel messages
// Turns a raw inbound frame into a validated trade event or rejects it.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed frame: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Raw wire shape of a matches channel message. The channel multiplexes
/// other message kinds (subscription acks, heartbeats), so everything
/// but `type` may be absent; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchFrame {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub product_id: String,
}

/// A validated trade execution, ready for routing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMatch {
    pub product_id: String,
    pub price: f64,
    pub size: f64,
}

/// Parse a string field as f64, failing fast on malformed input.
fn parse_f64_field(value: &str, field: &'static str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Decode one raw frame.
///
/// Returns Ok(None) for recognized-but-uninteresting frames (anything
/// that is not a trade execution); those are skipped, processing
/// continues. A structurally malformed frame or a non-numeric price or
/// size is an error, and an error here halts the session.
pub fn parse_match(frame: &str) -> Result<Option<ParsedMatch>, ParseError> {
    let raw: MatchFrame = serde_json::from_str(frame)?;

    if raw.kind != "match" && raw.kind != "last_match" {
        return Ok(None);
    }

    Ok(Some(ParsedMatch {
        price: parse_f64_field(&raw.price, "price")?,
        size: parse_f64_field(&raw.size, "size")?,
        product_id: raw.product_id,
    }))
}
