//! Domain models for the dashboard.

mod dashboard;
mod history;
mod instrument;

pub use dashboard::{Dashboard, InstrumentSlot, SharedDashboard, TIMESTAMP_FORMAT};
pub use history::HistoryWindow;
pub use instrument::Instrument;
