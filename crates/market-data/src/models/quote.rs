use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a security's trading state at retrieval time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker as echoed by the provider (e.g., "IBM")
    pub symbol: String,

    /// Company display name; the requested symbol when the lookup failed
    pub name: String,

    /// Last trade price
    pub price: Decimal,

    /// Absolute change from the previous close
    pub change: Decimal,

    /// Percentage change from the previous close (1.23 means 1.23%)
    pub change_percent: Decimal,

    /// Shares traded in the session
    pub volume: u64,

    pub high: Decimal,
    pub low: Decimal,
    pub open: Decimal,
    pub previous_close: Decimal,

    /// Session the snapshot belongs to
    pub last_trading_day: NaiveDate,
}

impl Quote {
    /// Returns a copy of this quote carrying a different display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
