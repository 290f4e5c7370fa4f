//! Market data models
//!
//! This module contains the core data types returned by the client:
//! - `quote` - Point-in-time quote snapshot (Quote)
//! - `history` - Daily bars for a historical series (HistoricalPoint)
//! - `search` - Symbol search matches (SymbolMatch)
//! - `batch` - Partial-success result of a batch quote fetch (BatchQuotes, SymbolError)

mod batch;
mod history;
mod quote;
mod search;

pub use batch::{BatchQuotes, SymbolError};
pub use history::HistoricalPoint;
pub use quote::Quote;
pub use search::SymbolMatch;
