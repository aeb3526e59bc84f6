//! HTTP client for the public market data API

use crate::api::{build_http_client, read_json};
use crate::error::{ClientError, ClientResult};
use dashboard_core::MarketAsset;
use dashboard_core::config::MarketConfig;
use reqwest::Client;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("rs-admin-dashboard/", env!("CARGO_PKG_VERSION"));

/// Unauthenticated client for `coins/markets`
#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    base_url: String,
    vs_currency: String,
    per_page: u16,
}

impl MarketClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &MarketConfig) -> ClientResult<Self> {
        let client = build_http_client(config.request_timeout(), USER_AGENT)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            vs_currency: config.vs_currency.clone(),
            per_page: config.per_page,
        })
    }

    /// Create a client against a base URL with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::from_config(&MarketConfig {
            base_url: base_url.into(),
            ..MarketConfig::default()
        })
    }

    /// Markets endpoint URL without the query string
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/coins/markets", self.base_url.trim_end_matches('/'))
    }

    /// Fetch the first page of assets ordered by market cap
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a failure
    /// status, or the body is not a list of assets.
    #[instrument(skip(self), fields(vs_currency = %self.vs_currency, per_page = self.per_page))]
    pub async fn fetch_markets(&self) -> ClientResult<Vec<MarketAsset>> {
        let url = self.endpoint();
        let per_page = self.per_page.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", self.vs_currency.as_str()),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "24h"),
                ("locale", "en"),
            ])
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(&url, &e))?;

        let assets: Vec<MarketAsset> = read_json(&url, response).await?;
        debug!(count = assets.len(), "Fetched market assets");
        Ok(assets)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoint() {
        let client = MarketClient::new("https://api.coingecko.com/api/v3/").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://api.coingecko.com/api/v3/coins/markets"
        );
    }

    #[test]
    fn test_from_config_copies_query_settings() {
        let config = MarketConfig {
            vs_currency: "eur".to_string(),
            per_page: 50,
            ..MarketConfig::default()
        };
        let client = MarketClient::from_config(&config).unwrap();
        assert_eq!(client.vs_currency, "eur");
        assert_eq!(client.per_page, 50);
    }
}
