//! Finlit Market Data Crate
//!
//! This crate provides stock-quote retrieval for the financial literacy
//! learning app, on top of the Alpha Vantage query API.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Real-time quotes, single and batched
//! - Daily historical series
//! - Symbol search
//! - Short-term quote caching and provider rate limiting
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! | MarketDataClient | --> |   QuoteCache     |  (TTL, per client)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |    RateGate      |  (fixed interval, per client)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    Transport     | --> |  alpha_vantage   |  (wire parsing, notice classification)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | Quote / History  |  (normalized models)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataClient`] - Cached, rate-limited market data operations
//! - [`ClientConfig`] - API key, freshness window, rate-limit interval and cooldown
//! - [`Quote`] - Point-in-time quote snapshot
//! - [`HistoricalPoint`] - One daily bar
//! - [`SymbolMatch`] - Symbol search match
//! - [`BatchQuotes`] - Partial results of a batch quote fetch
//! - [`MarketDataError`] - Error taxonomy with [`RetryClass`] classification

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod rate_limiter;

pub use cache::QuoteCache;
pub use client::{MarketDataClient, DEFAULT_HISTORY_DAYS};
pub use config::ClientConfig;
pub use errors::{MarketDataError, RetryClass};
pub use models::{BatchQuotes, HistoricalPoint, Quote, SymbolError, SymbolMatch};
pub use provider::{HttpTransport, Transport};
pub use rate_limiter::RateGate;
