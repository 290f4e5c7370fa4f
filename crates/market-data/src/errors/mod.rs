//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Each variant is classified into a [`RetryClass`] via the [`retry_class`](Self::retry_class)
/// method, which determines how callers should handle the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// The provider answered, but without the data we asked for
    /// (unknown symbol, no historical series).
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider returned a rate-limit notice (or HTTP 429).
    #[error("Rate limited: {provider} - {message}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
        /// The notice text returned by the provider
        message: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider returned an explicit error payload, a non-success
    /// status, or a body we could not interpret.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(String),

    /// Client configuration is missing or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use finlit_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited {
    ///     provider: "ALPHA_VANTAGE".to_string(),
    ///     message: "API call frequency exceeded".to_string(),
    /// };
    /// assert_eq!(error.retry_class(), RetryClass::AfterCooldown);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::SymbolNotFound(_) | Self::ProviderError { .. } | Self::InvalidConfig(_) => {
                RetryClass::Never
            }

            Self::RateLimited { .. } => RetryClass::AfterCooldown,

            Self::Timeout { .. } | Self::Network(_) => RetryClass::WithBackoff,
        }
    }

    /// True when the provider signalled that its request quota is exhausted.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for MarketDataError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                provider: crate::provider::alpha_vantage::PROVIDER_ID.to_string(),
            }
        } else {
            Self::Network(e.to_string())
        }
    }
}
