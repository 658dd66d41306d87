/// eBay Trading API client for listings, orders, users and sale completion
use std::sync::Arc;

use ebay_trading_core::TradingService;
use ebay_trading_domain::{ClientConfig, Credential, Result, TradingError};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::config::loader;
use crate::http::HttpClient;

/// Ready-to-use Trading API client over HTTP.
pub struct EbayClient {
    service: TradingService,
}

impl EbayClient {
    /// Create a client for a validated credential.
    pub fn new(credential: Credential, http_client: HttpClient) -> Self {
        Self { service: TradingService::new(credential, Arc::new(http_client)) }
    }

    /// Build a client from configuration: validates the credential, builds the
    /// HTTP transport and applies the endpoint override.
    ///
    /// # Errors
    /// - credential validation errors (`NoAuthToken`, `NotSupportedAuthType`,
    ///   `InvalidAuthNAuthConfig`, `Config`)
    /// - [`TradingError::Config`] for an endpoint that is not an HTTP(S) URL
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let credential = Credential::from_config(config.credentials)?;
        let http_client = HttpClient::from_config(&config.http)?;
        let client = Self::new(credential, http_client);

        let client = match config.endpoint {
            Some(endpoint) => client.with_endpoint(&endpoint)?,
            None => client,
        };

        info!(
            environment = %client.credential().environment(),
            auth_type = %client.credential().auth_type(),
            endpoint = client.endpoint(),
            "Trading API client ready"
        );
        Ok(client)
    }

    /// Build a client from configuration found in the environment or a
    /// config file.
    pub fn from_env() -> Result<Self> {
        Self::from_config(loader::load()?)
    }

    /// Send requests to `endpoint` instead of the environment's base URL.
    pub fn with_endpoint(self, endpoint: &str) -> Result<Self> {
        let endpoint = validate_endpoint(endpoint)?;
        Ok(Self { service: self.service.with_endpoint(endpoint) })
    }

    /// Credential every request is signed with.
    pub fn credential(&self) -> &Credential {
        self.service.credential()
    }

    /// Effective request URL.
    pub fn endpoint(&self) -> &str {
        self.service.endpoint()
    }

    /// `GetSellerList`, aggregated over every page.
    pub async fn get_seller_list<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.service.get_seller_list(options).await
    }

    /// `GetOrders`, aggregated over every page.
    pub async fn get_orders<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.service.get_orders(options).await
    }

    pub async fn get_user<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.service.get_user(options).await
    }

    pub async fn complete_sale<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.service.complete_sale(options).await
    }
}

fn validate_endpoint(endpoint: &str) -> Result<String> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| TradingError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(TradingError::Config(format!(
            "endpoint must use http or https, got '{other}'"
        ))),
    }
}
