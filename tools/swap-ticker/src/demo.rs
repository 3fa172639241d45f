//! Synthetic ticker source for running without network access.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use crate::api::{FetchError, Ticker, TickerSource};
use crate::domain::Instrument;

/// Largest relative move per tick.
const MAX_STEP: f64 = 0.0015;

/// Untracked record included in every response, like the real endpoint.
const NOISE_INSTRUMENT: &str = "DEMO-USDT-SWAP";

struct DemoPrice {
    inst_id: String,
    open: f64,
    last: f64,
}

/// Random-walk prices for a fixed set of instruments.
pub struct DemoSource {
    prices: Mutex<Vec<DemoPrice>>,
}

impl DemoSource {
    pub fn new<'a>(instruments: impl IntoIterator<Item = &'a Instrument>) -> Self {
        let prices = instruments
            .into_iter()
            .map(|instrument| {
                let open = seed_price(instrument.base());
                DemoPrice {
                    inst_id: instrument.id().to_string(),
                    open,
                    last: open,
                }
            })
            .collect();

        Self {
            prices: Mutex::new(prices),
        }
    }
}

#[async_trait]
impl TickerSource for DemoSource {
    async fn fetch_tickers(&self) -> Result<Vec<Ticker>, FetchError> {
        let ts = Utc::now().timestamp_millis().to_string();
        let mut rng = rand::thread_rng();
        let mut prices = self.prices.lock().unwrap_or_else(|p| p.into_inner());

        let mut tickers: Vec<Ticker> = prices
            .iter_mut()
            .map(|price| {
                let step = rng.gen_range(-MAX_STEP..=MAX_STEP);
                price.last = (price.last * (1.0 + step)).max(f64::EPSILON);

                let mut ticker = Ticker::new(&price.inst_id, format_price(price.last));
                ticker.open_24h = Some(format_price(price.open));
                ticker.ts = Some(ts.clone());
                ticker
            })
            .collect();

        tickers.push(Ticker::new(NOISE_INSTRUMENT, "1"));
        Ok(tickers)
    }

    fn describe(&self) -> String {
        "demo".to_string()
    }
}

fn seed_price(base: &str) -> f64 {
    match base {
        "BTC" => 67_000.0,
        "ETH" => 3_500.0,
        "BNB" => 580.0,
        "SOL" => 150.0,
        _ => 100.0,
    }
}

fn format_price(price: f64) -> String {
    if price >= 1_000.0 {
        format!("{:.1}", price)
    } else if price >= 1.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.5}", price)
    }
}
