//! REST client for the exchange tickers endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::parse_tickers;
use super::{FetchError, Ticker, TickerSource};

/// Path of the public tickers endpoint.
pub const TICKERS_PATH: &str = "/api/v5/market/tickers";

/// Connect timeout, independent of the overall request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Market-data REST client.
pub struct MarketClient {
    client: Client,
    base_url: String,
    inst_type: String,
}

impl MarketClient {
    /// Create a client for `base_url`, filtering tickers by `inst_type`.
    pub fn new(
        base_url: impl Into<String>,
        inst_type: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            inst_type: inst_type.into(),
        })
    }

    /// Full URL of the tickers endpoint, without the query string.
    pub fn tickers_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), TICKERS_PATH)
    }

    /// GET the tickers for the configured instrument type.
    pub async fn get_tickers(&self) -> Result<Vec<Ticker>, FetchError> {
        let started = Instant::now();

        let body = self
            .client
            .get(self.tickers_url())
            .query(&[("instType", self.inst_type.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let tickers = parse_tickers(&body)?;

        debug!(
            records = tickers.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched tickers"
        );

        Ok(tickers)
    }
}

#[async_trait]
impl TickerSource for MarketClient {
    async fn fetch_tickers(&self) -> Result<Vec<Ticker>, FetchError> {
        self.get_tickers().await
    }

    fn describe(&self) -> String {
        let host = self
            .base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        format!("{} {}", host, self.inst_type)
    }
}
