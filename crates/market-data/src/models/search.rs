//! Search result models for symbol lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized match from a ticker/keyword search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMatch {
    /// Symbol/ticker (e.g., "AAPL", "SHOP.TRT")
    pub symbol: String,

    /// Display name (e.g., "Apple Inc")
    pub name: String,

    /// Security type (e.g., "Equity", "ETF")
    #[serde(rename = "type")]
    pub asset_type: String,

    /// Listing region (e.g., "United States")
    pub region: String,

    /// Local market open time (e.g., "09:30")
    pub market_open: String,

    /// Local market close time (e.g., "16:00")
    pub market_close: String,

    /// Exchange timezone (e.g., "UTC-04")
    pub timezone: String,

    /// Trading currency (e.g., "USD")
    pub currency: String,

    /// Relevance score from provider (1.0 = exact match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<Decimal>,
}
