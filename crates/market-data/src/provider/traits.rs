//! Transport trait definition.
//!
//! This module defines the `Transport` trait, the only network boundary
//! of the client. Everything above it works on response bodies.

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// Trait for issuing provider queries.
///
/// Implementations send one request built from the query parameters and
/// return the raw response body. Credentials are the transport's concern;
/// callers never pass the API key.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use finlit_market_data::provider::Transport;
///
/// struct CannedTransport(String);
///
/// #[async_trait]
/// impl Transport for CannedTransport {
///     async fn get(&self, _params: &[(&str, &str)]) -> Result<String, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a single query and return the response body.
    ///
    /// # Arguments
    ///
    /// * `params` - Query parameters, e.g. `[("function", "GLOBAL_QUOTE"), ("symbol", "IBM")]`
    ///
    /// # Returns
    ///
    /// The response body on success. Transport-level failures are mapped to
    /// `Timeout`, `Network`, `RateLimited` (HTTP 429) or `ProviderError`.
    async fn get(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError>;
}
