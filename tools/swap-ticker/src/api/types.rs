//! Market-data wire types for the `/api/v5/market/tickers` endpoint.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::FetchError;

/// Exchange response code for a successful request.
pub const CODE_OK: &str = "0";

/// A single ticker record, kept as received.
///
/// Only `instId` is required. A missing or non-text `last` decodes as an
/// empty string and later reads as "no price"; the 24h fields accept text or
/// numbers. Every other exchange field lands in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    #[serde(rename = "instId")]
    pub inst_id: String,
    /// Last traded price, numeric-as-string.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub last: String,
    #[serde(default, rename = "open24h", deserialize_with = "optional_text")]
    pub open_24h: Option<String>,
    #[serde(default, rename = "high24h", deserialize_with = "optional_text")]
    pub high_24h: Option<String>,
    #[serde(default, rename = "low24h", deserialize_with = "optional_text")]
    pub low_24h: Option<String>,
    #[serde(default, rename = "vol24h", deserialize_with = "optional_text")]
    pub vol_24h: Option<String>,
    /// Exchange timestamp in milliseconds, as a string.
    #[serde(default, deserialize_with = "optional_text")]
    pub ts: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Ticker {
    pub fn new(inst_id: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            inst_id: inst_id.into(),
            last: last.into(),
            open_24h: None,
            high_24h: None,
            low_24h: None,
            vol_24h: None,
            ts: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Last price as a number, if it parses.
    pub fn last_price(&self) -> Option<f64> {
        parse_price(&self.last)
    }

    /// Percentage change of `last` against `open24h`.
    pub fn change_24h_pct(&self) -> Option<f64> {
        let open = self.open_24h.as_deref().and_then(parse_price)?;
        let last = self.last_price()?;
        if open == 0.0 {
            return None;
        }
        Some((last - open) / open * 100.0)
    }
}

/// Envelope of the tickers response.
///
/// Records stay raw here so one malformed entry cannot fail the whole body.
#[derive(Debug, Clone, Deserialize)]
pub struct TickersResponse {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Vec<Value>,
}

/// Parse a tickers response body, rejecting non-zero exchange codes.
///
/// Records that do not decode as a [`Ticker`] (no `instId`, not an object)
/// are skipped.
pub fn parse_tickers(body: &str) -> Result<Vec<Ticker>, FetchError> {
    let response: TickersResponse = serde_json::from_str(body)?;

    if response.code != CODE_OK {
        return Err(FetchError::Api {
            code: response.code,
            msg: response.msg,
        });
    }

    let total = response.data.len();
    let tickers: Vec<Ticker> = response
        .data
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect();

    if tickers.len() < total {
        debug!(skipped = total - tickers.len(), "Skipped malformed ticker records");
    }

    Ok(tickers)
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(Value::deserialize(deserializer)?))
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}
