//! Dashboard state: per-instrument snapshots and rolling histories.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;

use super::{HistoryWindow, Instrument};
use crate::api::Ticker;

/// Wall-clock format of the shared timestamp window.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Dashboard shared between the poller and the draw loop.
pub type SharedDashboard = Arc<Mutex<Dashboard>>;

/// State tracked for one instrument.
#[derive(Debug, Clone)]
pub struct InstrumentSlot {
    pub instrument: Instrument,
    /// Latest record for this instrument, `None` until a tick found one.
    pub snapshot: Option<Ticker>,
    /// Price samples; `None` marks a tick without a usable price.
    pub history: HistoryWindow<Option<f64>>,
}

impl InstrumentSlot {
    fn new(instrument: Instrument, capacity: usize) -> Self {
        Self {
            instrument,
            snapshot: None,
            history: HistoryWindow::new(capacity),
        }
    }

    /// Whether a card should be drawn for this slot.
    pub fn is_visible(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Lowest and highest recorded price, skipping gaps.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.history.iter().flatten().fold(None, |range, &price| match range {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })
    }
}

/// All dashboard state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    slots: Vec<InstrumentSlot>,
    timestamps: HistoryWindow<String>,
    last_update: Option<DateTime<Local>>,
    ticks_applied: u64,
}

impl Dashboard {
    /// Create an empty dashboard tracking `instruments`, in display order.
    pub fn new(instruments: impl IntoIterator<Item = Instrument>, capacity: usize) -> Self {
        let slots = instruments
            .into_iter()
            .map(|instrument| InstrumentSlot::new(instrument, capacity))
            .collect();

        Self {
            slots,
            timestamps: HistoryWindow::new(capacity),
            last_update: None,
            ticks_applied: 0,
        }
    }

    /// Wrap into the shared handle used by the poller and renderer.
    pub fn into_shared(self) -> SharedDashboard {
        Arc::new(Mutex::new(self))
    }

    /// Apply one successful tick.
    ///
    /// Every tracked slot is overwritten: the snapshot becomes the first record
    /// whose `instId` matches, or `None` when the response has none, and one
    /// price sample is appended. One timestamp is appended to the shared
    /// window so all windows stay the same length. Untracked records are
    /// ignored.
    pub fn apply_tickers(&mut self, tickers: &[Ticker], at: DateTime<Local>) {
        for slot in &mut self.slots {
            let found = tickers
                .iter()
                .find(|ticker| ticker.inst_id == slot.instrument.id());

            slot.history.push(found.and_then(Ticker::last_price));
            slot.snapshot = found.cloned();
        }

        self.timestamps.push(at.format(TIMESTAMP_FORMAT).to_string());
        self.last_update = Some(at);
        self.ticks_applied += 1;
    }

    pub fn slots(&self) -> &[InstrumentSlot] {
        &self.slots
    }

    pub fn slot(&self, inst_id: &str) -> Option<&InstrumentSlot> {
        self.slots.iter().find(|slot| slot.instrument.id() == inst_id)
    }

    /// Slots that currently have a snapshot, in display order.
    pub fn visible_slots(&self) -> impl Iterator<Item = &InstrumentSlot> {
        self.slots.iter().filter(|slot| slot.is_visible())
    }

    pub fn timestamps(&self) -> &HistoryWindow<String> {
        &self.timestamps
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    /// Number of successful ticks applied since start-up.
    pub fn ticks_applied(&self) -> u64 {
        self.ticks_applied
    }
}
