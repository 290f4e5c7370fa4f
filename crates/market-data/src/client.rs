//! Market data client.
//!
//! [`MarketDataClient`] is the entry point of the crate. It owns its quote
//! cache and its rate gate, so independently configured clients never
//! share state.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::cache::QuoteCache;
use crate::config::ClientConfig;
use crate::errors::{MarketDataError, RetryClass};
use crate::models::{BatchQuotes, HistoricalPoint, Quote, SymbolError, SymbolMatch};
use crate::provider::alpha_vantage::{
    self, OutputSize, FUNCTION_GLOBAL_QUOTE, FUNCTION_OVERVIEW, FUNCTION_SYMBOL_SEARCH,
    FUNCTION_TIME_SERIES_DAILY, PROVIDER_ID,
};
use crate::provider::{HttpTransport, Transport};
use crate::rate_limiter::RateGate;

/// Number of daily bars returned when the caller has no preference.
pub const DEFAULT_HISTORY_DAYS: usize = 30;

/// Read-only market data operations with caching and rate limiting.
///
/// Every outbound request passes through a single rate gate, so no two
/// requests start less than `rate_limit_interval` apart. Quotes are cached
/// for `cache_ttl`; cache hits make no request and never wait on the gate.
pub struct MarketDataClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    cache: QuoteCache,
    rate_gate: RateGate,
}

impl MarketDataClient {
    /// Create a client that talks to the provider over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the API key is missing or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, MarketDataError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let cache = QuoteCache::new(config.cache_ttl, config.cache_capacity);
        let rate_gate = RateGate::new(config.rate_limit_interval);
        debug!(
            "Market data client: {:?} between requests, quotes fresh for {:?}",
            rate_gate.interval(),
            config.cache_ttl
        );
        Self {
            config,
            transport,
            cache,
            rate_gate,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Number of quotes currently held in the cache.
    pub fn cached_quotes(&self) -> usize {
        self.cache.len()
    }

    /// Issue one outbound request through the rate gate.
    ///
    /// The request counts against the interval from the moment it is sent,
    /// even if it later times out.
    async fn request(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        self.rate_gate.acquire().await;

        match tokio::time::timeout(self.config.request_timeout, self.transport.get(params)).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Alpha Vantage request timed out after {:?}",
                    self.config.request_timeout
                );
                Err(MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                })
            }
        }
    }

    /// Fetch the real-time quote for `symbol`.
    ///
    /// The symbol is passed to the provider unmodified. A fresh cached quote
    /// is returned without any request.
    ///
    /// # Errors
    ///
    /// - `ProviderError` for explicit provider errors
    /// - `RateLimited` for provider quota notices
    /// - `SymbolNotFound` when the response carries no quote
    /// - `Timeout` when the request exceeds `request_timeout`
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        if let Some(quote) = self.cache.get(symbol) {
            debug!("Quote cache hit for {}", symbol);
            return Ok(quote);
        }

        let text = self
            .request(&[("function", FUNCTION_GLOBAL_QUOTE), ("symbol", symbol)])
            .await?;
        let quote = alpha_vantage::parse_global_quote(symbol, &text)?;

        let name = self.resolve_company_name(symbol).await;
        let quote = quote.with_name(name);

        self.cache.insert(symbol, quote.clone());
        debug!("Fetched quote for {}: {}", symbol, quote.price);

        Ok(quote)
    }

    /// Best-effort lookup of the display name for `symbol`.
    ///
    /// Never fails: any error degrades to returning the symbol itself.
    pub async fn resolve_company_name(&self, symbol: &str) -> String {
        match self.fetch_company_name(symbol).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Company name lookup failed for {}, using symbol: {}", symbol, e);
                symbol.to_string()
            }
        }
    }

    async fn fetch_company_name(&self, symbol: &str) -> Result<String, MarketDataError> {
        let text = self
            .request(&[("function", FUNCTION_OVERVIEW), ("symbol", symbol)])
            .await?;
        alpha_vantage::parse_company_name(symbol, &text)
    }

    /// Fetch quotes for several symbols, one after another.
    ///
    /// A failing symbol is recorded in `errors` and the batch moves on. When a
    /// symbol fails because the provider's quota is exhausted, the batch pauses
    /// for `rate_limit_cooldown` before trying the next symbol.
    pub async fn get_quotes<S: AsRef<str>>(&self, symbols: &[S]) -> BatchQuotes {
        let mut batch = BatchQuotes::default();

        for (index, symbol) in symbols.iter().enumerate() {
            let symbol = symbol.as_ref();
            match self.get_quote(symbol).await {
                Ok(quote) => batch.results.push(quote),
                Err(error) => {
                    warn!("Failed to fetch quote for {}: {}", symbol, error);
                    let cool_down = error.retry_class() == RetryClass::AfterCooldown
                        && index + 1 < symbols.len();

                    batch.errors.push(SymbolError {
                        symbol: symbol.to_string(),
                        error,
                    });

                    if cool_down {
                        info!(
                            "Provider rate limit reached, cooling down for {:?}",
                            self.config.rate_limit_cooldown
                        );
                        tokio::time::sleep(self.config.rate_limit_cooldown).await;
                    }
                }
            }
        }

        debug!("{}", batch.summary());
        batch
    }

    /// Fetch the most recent `days` daily bars for `symbol`, oldest first.
    ///
    /// Requests the provider's full history only when `days` exceeds the
    /// compact window.
    pub async fn get_history(
        &self,
        symbol: &str,
        days: usize,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        if days == 0 {
            return Ok(Vec::new());
        }

        let output_size = OutputSize::for_days(days);
        let text = self
            .request(&[
                ("function", FUNCTION_TIME_SERIES_DAILY),
                ("symbol", symbol),
                ("outputsize", output_size.as_str()),
            ])
            .await?;

        alpha_vantage::parse_daily_series(symbol, &text, days)
    }

    /// Search for symbols matching `keyword`.
    ///
    /// A blank keyword returns no matches without contacting the provider.
    pub async fn search_symbols(&self, keyword: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let text = self
            .request(&[("function", FUNCTION_SYMBOL_SEARCH), ("keywords", keyword)])
            .await?;

        alpha_vantage::parse_symbol_search(&text)
    }
}
