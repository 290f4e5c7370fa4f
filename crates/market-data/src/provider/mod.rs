//! Provider wire format and transport.
//!
//! This module contains:
//! - The `Transport` trait, the network seam of the client
//! - `HttpTransport`, its `reqwest` implementation
//! - The Alpha Vantage response parsers, which turn raw bodies into the
//!   crate's models and classify provider notices into `MarketDataError`

mod http;
mod traits;

pub mod alpha_vantage;

pub use http::HttpTransport;
pub use traits::Transport;
