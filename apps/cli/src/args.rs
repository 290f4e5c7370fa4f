//! Command-line arguments for the quote tool.
use clap::{Parser, Subcommand};

use finlit_market_data::DEFAULT_HISTORY_DAYS;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Stock quotes for the financial literacy app", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch real-time quotes. Several symbols are fetched one after another.
    Quote {
        /// Ticker symbols, e.g. IBM AAPL
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// Fetch recent daily bars, oldest first.
    History {
        /// Ticker symbol
        symbol: String,

        /// Number of trading days to return
        #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
        days: usize,
    },

    /// Search symbols by keyword.
    Search {
        /// Company name or ticker fragment
        keyword: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_history_default_days() {
        let args = Args::try_parse_from(["finlit-quotes", "history", "IBM"]).unwrap();
        match args.command {
            Command::History { symbol, days } => {
                assert_eq!(symbol, "IBM");
                assert_eq!(days, DEFAULT_HISTORY_DAYS);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_quote_requires_symbol() {
        assert!(Args::try_parse_from(["finlit-quotes", "quote"]).is_err());

        let args = Args::try_parse_from(["finlit-quotes", "quote", "IBM", "AAPL"]).unwrap();
        assert!(matches!(args.command, Command::Quote { ref symbols } if symbols.len() == 2));
    }
}
