//! Trading API client facade - core business logic

use std::sync::Arc;

use ebay_trading_domain::constants::HEADER_CALL_NAME;
use ebay_trading_domain::{Credential, Result, TradingError};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::calls::{CallSpec, COMPLETE_SALE, GET_ORDERS, GET_SELLER_LIST, GET_USER};
use super::envelope::{build_envelope, Pagination};
use super::pagination::run_paged;
use super::response::{check_ack, parse_response, response_body};
use crate::transport_ports::{Transport, TransportRequest};

/// Trading API service
///
/// Holds an immutable credential and a transport; safe to share across
/// concurrent calls. Each call is independent.
pub struct TradingService {
    transport: Arc<dyn Transport>,
    credential: Arc<Credential>,
    endpoint: Option<String>,
}

impl TradingService {
    /// Create a new service. An already expired credential is accepted but
    /// logged.
    pub fn new(credential: Credential, transport: Arc<dyn Transport>) -> Self {
        if credential.is_expired() {
            warn!(
                user_id = credential.user_id(),
                expire = %credential.expire(),
                "Trading API credential has expired; calls will likely be rejected"
            );
        }

        Self { transport, credential: Arc::new(credential), endpoint: None }
    }

    /// Send requests to `endpoint` instead of the environment's base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Effective request URL.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or_else(|| self.credential.base_url())
    }

    /// All listings of the seller, across every page.
    pub async fn get_seller_list<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.execute(&GET_SELLER_LIST, options).await
    }

    /// All orders where the account is the seller, across every page.
    pub async fn get_orders<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.execute(&GET_ORDERS, options).await
    }

    pub async fn get_user<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.execute(&GET_USER, options).await
    }

    /// Mark an order line item as shipped. `OrderLineItemID` and `Shipment`
    /// must be present.
    pub async fn complete_sale<O>(&self, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        self.execute(&COMPLETE_SALE, options).await
    }

    /// Run any described call.
    ///
    /// Options are validated before the first request; paged calls are
    /// aggregated into a single document.
    ///
    /// # Errors
    /// - [`TradingError::InvalidOptions`] for unusable options (no request is
    ///   sent)
    /// - [`TradingError::Network`], [`TradingError::Http`],
    ///   [`TradingError::Parse`] or [`TradingError::Api`] from any request
    #[instrument(skip(self, call, options), fields(call = call.name))]
    pub async fn execute<O>(&self, call: &CallSpec, options: &O) -> Result<Value>
    where
        O: Serialize + ?Sized,
    {
        let options = serde_json::to_value(options).map_err(|e| {
            TradingError::InvalidOptions(format!("{} options cannot be serialized: {e}", call.name))
        })?;
        call.validate_options(&options)?;

        let document = match call.pagination {
            Some(page) => {
                let options = &options;
                run_paged(call.name, page, move |cursor| {
                    self.fetch_page(call, options, Some(cursor))
                })
                .await?
            }
            None => self.fetch_page(call, &options, None).await?,
        };

        match call.pagination.and_then(|page| count_entries(&document, call, page.list_path)) {
            Some(entries) => info!(call = call.name, entries, "Trading API call completed"),
            None => info!(call = call.name, "Trading API call completed"),
        }

        Ok(document)
    }

    /// One build -> send -> parse cycle.
    async fn fetch_page(
        &self,
        call: &CallSpec,
        options: &Value,
        pagination: Option<Pagination>,
    ) -> Result<Value> {
        let body = build_envelope(call.name, options, call.defaults, pagination)?;

        let mut headers = self.credential.auth_headers();
        headers.insert(HEADER_CALL_NAME.to_string(), call.name.to_string());

        let request = TransportRequest { url: self.endpoint().to_string(), headers, body };
        debug!(
            call = call.name,
            page = pagination.map(|p| p.page_number),
            url = %request.url,
            "sending Trading API request"
        );

        let response = self.transport.send(request).await?;
        debug!(call = call.name, status = response.status, "received Trading API response");

        if !response.is_success() {
            return Err(TradingError::Http { status: response.status, body: response.body });
        }

        let document = parse_response(&response.body, &call.schema())?;
        check_ack(call.name, &document)?;
        Ok(document)
    }
}

fn count_entries(document: &Value, call: &CallSpec, list_path: &str) -> Option<usize> {
    let mut current = response_body(document, call.name)?;
    for segment in list_path.split('.') {
        current = current.get(segment)?;
    }
    current.as_array().map(Vec::len)
}
