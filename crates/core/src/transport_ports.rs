//! Transport port
//!
//! The core never talks to the network directly. Infrastructure supplies an
//! implementation of [`Transport`]; tests supply scripted ones.

use std::collections::BTreeMap;

use async_trait::async_trait;
use ebay_trading_domain::Result;

/// A single HTTP POST to the Trading API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Endpoint URL.
    pub url: String,
    /// Authentication and routing headers.
    pub headers: BTreeMap<String, String>,
    /// XML envelope.
    pub body: String,
}

/// Raw status and body returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body as text.
    pub body: String,
}

impl TransportResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for sending envelopes to the vendor endpoint
///
/// Implementations own timeouts and cancellation. Transport-level failures
/// are reported as `TradingError::Network`; any HTTP status, including error
/// statuses, is returned as a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}
