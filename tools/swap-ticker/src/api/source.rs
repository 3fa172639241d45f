//! Ticker source seam.

use async_trait::async_trait;

use super::{FetchError, Ticker};

/// Anything that can produce a full tickers snapshot on demand.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetch every ticker record the source knows about.
    async fn fetch_tickers(&self) -> Result<Vec<Ticker>, FetchError>;

    /// Short human-readable description shown in the header.
    fn describe(&self) -> String;
}
