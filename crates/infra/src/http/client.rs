use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use ebay_trading_core::{Transport, TransportRequest, TransportResponse};
use ebay_trading_domain::{HttpConfig, Result, TradingError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with timeout support. Every request is attempted exactly once.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Build a client from the `http` section of the client configuration.
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Self::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(|err| TradingError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let headers = header_map(&request.headers)?;
        let builder = self.request(Method::POST, request.url.as_str()).headers(headers).body(request.body);

        let response = self.execute(builder).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| TradingError::from(InfraError::from(err)))?;

        Ok(TransportResponse { status, body })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TradingError::Config(format!("invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| TradingError::Config(format!("invalid value for header '{name}': {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(ebay_trading_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` header sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the underlying reqwest client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| TradingError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use wiremock::matchers::{body_string, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn request(url: String, body: &str) -> TransportRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "text/xml".to_string());
        headers.insert("X-EBAY-API-CALL-NAME".to_string(), "GetUser".to_string());
        TransportRequest { url, headers, body: body.to_string() }
    }

    #[tokio::test]
    async fn posts_headers_and_body_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-EBAY-API-CALL-NAME", "GetUser"))
            .and(header("Content-Type", "text/xml"))
            .and(body_string("<GetUserRequest/>"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<GetUserResponse/>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client.send(request(server.uri(), "<GetUserRequest/>")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<GetUserResponse/>");
    }

    #[tokio::test]
    async fn server_errors_are_returned_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client.send(request(server.uri(), "")).await.unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn slow_server_times_out_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::builder().timeout(Duration::from_millis(50)).build().unwrap();
        let err = client.send(request(server.uri(), "")).await.unwrap_err();

        assert!(matches!(err, TradingError::Network(_)), "{err:?}");
    }

    #[tokio::test]
    async fn connection_failure_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new().unwrap();
        let err = client.send(request(format!("http://{addr}"), "")).await.unwrap_err();

        assert!(matches!(err, TradingError::Network(_)), "{err:?}");
    }

    #[test]
    fn invalid_header_values_are_rejected() {
        let mut headers = BTreeMap::new();
        headers.insert("X-EBAY-API-IAF-TOKEN".to_string(), "Bearer bad\ntoken".to_string());

        let err = header_map(&headers).unwrap_err();
        assert!(matches!(err, TradingError::Config(_)));
    }
}
