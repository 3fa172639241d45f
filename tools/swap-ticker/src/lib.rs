//! Swap-Ticker: live perpetual swap price dashboard.
//!
//! Polls a public market-data endpoint on a fixed interval, keeps a short
//! rolling history per tracked instrument and renders one colored card per
//! instrument with an embedded sparkline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  tick  ┌──────────────┐ apply ┌──────────────┐ draw ┌──────┐
//! │ interval     │ ─────> │ TickerSource │ ────> │  Dashboard   │ ───> │  ui  │
//! │ (poller)     │        │ (api / demo) │       │ (Arc<Mutex>) │      │      │
//! └──────────────┘        └──────────────┘       └──────────────┘      └──────┘
//! ```
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  SWAP-TICKER v0.1.0   okx.com                  Last update 12:01│
//! ├─────────────────────┬─────────────────────┬─────────────────────┤
//! │ BTC-USDT            │ ETH-USDT            │ BNB-USDT            │
//! │  ⣀⡠⠔⠊⠉⠑   67012.3   │  ⠉⠑⠢⣀⡠⠔   3504.12   │  ⣀⣀⡠⠤⠒⠊   581.4     │
//! └─────────────────────┴─────────────────────┴─────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod demo;
pub mod domain;
pub mod poller;
pub mod telemetry;
pub mod ui;

pub use api::{FetchError, MarketClient, Ticker, TickerSource};
pub use config::{Args, Config, ConfigError};
pub use domain::{Dashboard, HistoryWindow, Instrument, InstrumentSlot, SharedDashboard};
pub use poller::{Poller, PollerCommand, PollerHandle};
