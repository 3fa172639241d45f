//! Market-data access.
//!
//! `MarketClient` talks to the exchange REST API; everything that can feed the
//! poller implements `TickerSource`.

mod client;
mod error;
mod source;
mod types;

pub use client::{MarketClient, TICKERS_PATH};
pub use error::FetchError;
pub use source::TickerSource;
pub use types::{parse_tickers, Ticker, TickersResponse, CODE_OK};
