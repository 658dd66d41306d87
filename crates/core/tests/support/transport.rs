//! Scripted `Transport` for core tests
//!
//! Replies are served in the order they were queued and every request is
//! recorded for later inspection.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ebay_trading_core::{Transport, TransportRequest, TransportResponse};
use ebay_trading_domain::{Result as DomainResult, TradingError};

#[derive(Default, Clone)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<DomainResult<TransportResponse>>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `200 OK` reply with the given body.
    pub fn ok(self, body: impl Into<String>) -> Self {
        self.status(200, body)
    }

    pub fn status(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse { status, body: body.into() }));
        self
    }

    pub fn fail(self, error: TradingError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> DomainResult<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TradingError::Network("no scripted reply left".to_string())))
    }
}
