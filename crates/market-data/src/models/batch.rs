use serde::Serialize;

use super::quote::Quote;
use crate::errors::MarketDataError;

/// Outcome of fetching quotes for several symbols.
///
/// A failure on one symbol never hides the results of the others.
#[derive(Debug, Default, Serialize)]
pub struct BatchQuotes {
    /// Successful quotes, in input order.
    pub results: Vec<Quote>,
    /// One entry per symbol that failed, in input order.
    pub errors: Vec<SymbolError>,
}

impl BatchQuotes {
    /// Check if every symbol was fetched.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("Fetched {} quotes successfully", self.results.len())
        } else {
            format!(
                "Fetched {} quotes with {} failures",
                self.results.len(),
                self.errors.len()
            )
        }
    }
}

/// A symbol that could not be fetched during a batch operation.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolError {
    /// The symbol as it was requested.
    pub symbol: String,
    /// Why the fetch failed.
    #[serde(serialize_with = "serialize_error")]
    pub error: MarketDataError,
}

fn serialize_error<S: serde::Serializer>(
    error: &MarketDataError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_reports_failures() {
        let mut batch = BatchQuotes::default();
        assert!(batch.is_complete());
        assert_eq!(batch.summary(), "Fetched 0 quotes successfully");

        batch.errors.push(SymbolError {
            symbol: "NOPE".to_string(),
            error: MarketDataError::SymbolNotFound("NOPE".to_string()),
        });
        assert!(!batch.is_complete());
        assert_eq!(batch.summary(), "Fetched 0 quotes with 1 failures");
    }

    #[test]
    fn test_symbol_error_serializes_message() {
        let error = SymbolError {
            symbol: "NOPE".to_string(),
            error: MarketDataError::SymbolNotFound("NOPE".to_string()),
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["symbol"], "NOPE");
        assert_eq!(json["error"], "Symbol not found: NOPE");
    }
}
