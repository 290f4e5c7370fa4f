//! `reqwest`-backed transport.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use super::alpha_vantage::PROVIDER_ID;
use super::traits::Transport;
use crate::config::ClientConfig;
use crate::errors::MarketDataError;

/// HTTP transport for the provider's query endpoint.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Create a transport from client configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the API key is empty or the HTTP client
    /// cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, MarketDataError> {
        if config.api_key.trim().is_empty() {
            return Err(MarketDataError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                MarketDataError::InvalidConfig(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(&self.base_url, &all_params).map_err(|e| {
            MarketDataError::InvalidConfig(format!("Failed to build URL: {}", e))
        })?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self.client.get(url).send().await?;

        classify_status(response.status())?;

        Ok(response.text().await?)
    }
}

/// Map an HTTP status to the error it signals, if any.
fn classify_status(status: StatusCode) -> Result<(), MarketDataError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    if !status.is_success() {
        return Err(MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    Ok(())
}
