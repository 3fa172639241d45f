//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::domain::Instrument;

/// Default market-data host.
pub const DEFAULT_BASE_URL: &str = "https://www.okx.com";

/// Instruments tracked when none are given.
pub const DEFAULT_INSTRUMENTS: [&str; 3] = ["BTC-USDT-SWAP", "ETH-USDT-SWAP", "BNB-USDT-SWAP"];

/// Default number of samples kept per instrument.
pub const DEFAULT_HISTORY: usize = 20;

/// Shortest accepted poll period.
const MIN_REFRESH_MS: u64 = 100;

/// Smallest window that can still draw a line.
const MIN_HISTORY: usize = 2;

/// Swap-Ticker: live perpetual swap prices in the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "swap-ticker")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Market-data REST base URL
    #[arg(long, env = "SWAP_TICKER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Instrument type filter sent with every request
    #[arg(long, default_value = "SWAP")]
    pub inst_type: String,

    /// Instrument ids to track, comma separated, in display order
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "BTC-USDT-SWAP,ETH-USDT-SWAP,BNB-USDT-SWAP"
    )]
    pub instruments: Vec<String>,

    /// Poll period in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub refresh_ms: u64,

    /// Samples kept per instrument
    #[arg(long, default_value_t = DEFAULT_HISTORY)]
    pub history: usize,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, default_value = "swap-ticker.log")]
    pub log_file: PathBuf,

    /// Log filter, e.g. `info` or `swap_ticker=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Run with synthetic prices instead of the exchange API
    #[arg(long)]
    pub demo: bool,
}

/// Invalid configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one instrument must be tracked")]
    NoInstruments,
    #[error("instrument {0} is listed more than once")]
    DuplicateInstrument(String),
    #[error("refresh period {0}ms is below the {min}ms minimum", min = MIN_REFRESH_MS)]
    RefreshTooShort(u64),
    #[error("history of {0} samples is below the minimum of {min}", min = MIN_HISTORY)]
    HistoryTooShort(usize),
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub inst_type: String,
    pub instruments: Vec<Instrument>,
    pub refresh: Duration,
    pub history: usize,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
    pub log_level: String,
    pub demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            inst_type: "SWAP".to_string(),
            instruments: DEFAULT_INSTRUMENTS.into_iter().map(Instrument::new).collect(),
            refresh: Duration::from_millis(1000),
            history: DEFAULT_HISTORY,
            request_timeout: Duration::from_millis(5000),
            log_file: PathBuf::from("swap-ticker.log"),
            log_level: "info".to_string(),
            demo: false,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mut instruments: Vec<Instrument> = Vec::new();
        for id in args.instruments.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if instruments.iter().any(|known| known.id() == id) {
                return Err(ConfigError::DuplicateInstrument(id.to_string()));
            }
            instruments.push(Instrument::new(id));
        }

        if instruments.is_empty() {
            return Err(ConfigError::NoInstruments);
        }
        if args.refresh_ms < MIN_REFRESH_MS {
            return Err(ConfigError::RefreshTooShort(args.refresh_ms));
        }
        if args.history < MIN_HISTORY {
            return Err(ConfigError::HistoryTooShort(args.history));
        }
        if args.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            base_url: args.base_url,
            inst_type: args.inst_type,
            instruments,
            refresh: Duration::from_millis(args.refresh_ms),
            history: args.history,
            request_timeout: Duration::from_millis(args.timeout_ms),
            log_file: args.log_file,
            log_level: args.log_level,
            demo: args.demo,
        })
    }
}
