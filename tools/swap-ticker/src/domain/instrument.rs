//! Tracked instrument identity.

/// Suffix the exchange appends to perpetual swap instrument ids.
const SWAP_SUFFIX: &str = "-SWAP";

/// A tradable symbol tracked by the dashboard, e.g. `BTC-USDT-SWAP`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instrument {
    id: String,
}

impl Instrument {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Exchange instrument id, matched against `instId` in ticker records.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label: the id without the swap suffix (`BTC-USDT`).
    pub fn label(&self) -> &str {
        self.id.strip_suffix(SWAP_SUFFIX).unwrap_or(&self.id)
    }

    /// Base currency (`BTC` for `BTC-USDT-SWAP`).
    pub fn base(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}
