use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily bar of a historical series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    /// Trading day
    pub date: NaiveDate,

    /// Closing price
    pub price: Decimal,

    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: u64,
}
