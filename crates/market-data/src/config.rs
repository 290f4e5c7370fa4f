//! Client configuration.
//!
//! Defaults match the Alpha Vantage free tier (5 requests per minute).
//! Every value can be overridden from the environment with [`ClientConfig::from_env`].

use std::time::Duration;

use crate::errors::MarketDataError;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
const DEFAULT_CACHE_CAPACITY: usize = 1024;
const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(12);
const DEFAULT_RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub const ENV_API_KEY: &str = "ALPHA_VANTAGE_API_KEY";
pub const ENV_BASE_URL: &str = "ALPHA_VANTAGE_BASE_URL";
pub const ENV_CACHE_TTL_SECS: &str = "MARKET_DATA_CACHE_TTL_SECS";
pub const ENV_CACHE_CAPACITY: &str = "MARKET_DATA_CACHE_CAPACITY";
pub const ENV_RATE_LIMIT_INTERVAL_SECS: &str = "MARKET_DATA_RATE_LIMIT_INTERVAL_SECS";
pub const ENV_RATE_LIMIT_COOLDOWN_SECS: &str = "MARKET_DATA_RATE_LIMIT_COOLDOWN_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "MARKET_DATA_REQUEST_TIMEOUT_SECS";

/// Configuration for a [`MarketDataClient`](crate::MarketDataClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Credential forwarded on every provider request.
    pub api_key: String,

    /// Provider query endpoint.
    pub base_url: String,

    /// How long a cached quote is served without refetching.
    pub cache_ttl: Duration,

    /// Maximum number of cached quotes. `None` leaves the cache unbounded.
    pub cache_capacity: Option<usize>,

    /// Minimum spacing between the start of two outbound requests.
    pub rate_limit_interval: Duration,

    /// Extra pause after a rate-limit notice during a batch fetch.
    pub rate_limit_cooldown: Duration,

    /// Upper bound on a single outbound request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: Some(DEFAULT_CACHE_CAPACITY),
            rate_limit_interval: DEFAULT_RATE_LIMIT_INTERVAL,
            rate_limit_cooldown: DEFAULT_RATE_LIMIT_COOLDOWN,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default limits and the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from process environment variables.
    ///
    /// `ALPHA_VANTAGE_API_KEY` is required; everything else falls back to
    /// the defaults.
    pub fn from_env() -> Result<Self, MarketDataError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MarketDataError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| MarketDataError::InvalidConfig(format!("{} is not set", ENV_API_KEY)))?;

        let defaults = Self::default();
        let secs = |name: &str, default: Duration| -> Result<Duration, MarketDataError> {
            match lookup(name) {
                Some(raw) => parse_u64(name, &raw).map(Duration::from_secs),
                None => Ok(default),
            }
        };

        let cache_capacity = match lookup(ENV_CACHE_CAPACITY) {
            Some(raw) => match parse_u64(ENV_CACHE_CAPACITY, &raw)? {
                0 => None,
                n => Some(n as usize),
            },
            None => defaults.cache_capacity,
        };

        Ok(Self {
            api_key,
            base_url: lookup(ENV_BASE_URL).unwrap_or(defaults.base_url),
            cache_ttl: secs(ENV_CACHE_TTL_SECS, defaults.cache_ttl)?,
            cache_capacity,
            rate_limit_interval: secs(ENV_RATE_LIMIT_INTERVAL_SECS, defaults.rate_limit_interval)?,
            rate_limit_cooldown: secs(ENV_RATE_LIMIT_COOLDOWN_SECS, defaults.rate_limit_cooldown)?,
            request_timeout: secs(ENV_REQUEST_TIMEOUT_SECS, defaults.request_timeout)?,
        })
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, MarketDataError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| MarketDataError::InvalidConfig(format!("{}={:?}: {}", name, raw, e)))
}
