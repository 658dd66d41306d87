//! Shared fixtures for infra integration tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use ebay_trading_domain::{AppConfig, ClientConfig, CredentialConfig, HttpConfig};

/// OAuth configuration pointed at `endpoint`.
pub fn oauth_config(endpoint: &str) -> ClientConfig {
    ClientConfig {
        credentials: CredentialConfig {
            email: "seller@example.com".to_string(),
            user_id: "test-seller".to_string(),
            token: Some("v^1.1#token".to_string()),
            auth_type: "oauth".to_string(),
            expire: Utc::now() + Duration::days(30),
            environment: "sandbox".to_string(),
            app_config: None,
        },
        http: HttpConfig { timeout_secs: 5, user_agent: Some("ebay-trading-tests".to_string()) },
        endpoint: Some(endpoint.to_string()),
    }
}

/// Auth'n'Auth configuration pointed at `endpoint`.
pub fn authnauth_config(endpoint: &str) -> ClientConfig {
    let mut config = oauth_config(endpoint);
    config.credentials.auth_type = "authnauth".to_string();
    config.credentials.app_config = Some(AppConfig {
        client_id: "app-id".to_string(),
        dev_id: "dev-id".to_string(),
        cert_id: "cert-id".to_string(),
    });
    config
}

pub fn seller_list_page(total_pages: u32, ids: &[u32]) -> String {
    let items: String =
        ids.iter().map(|id| format!("<Item><ItemID>{id}</ItemID></Item>")).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<GetSellerListResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Ack>Success</Ack>
  <PaginationResult><TotalNumberOfPages>{total_pages}</TotalNumberOfPages></PaginationResult>
  <ItemArray>{items}</ItemArray>
</GetSellerListResponse>"#
    )
}

pub fn response(call: &str, ack: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<{call}Response xmlns="urn:ebay:apis:eBLBaseComponents"><Ack>{ack}</Ack>{inner}</{call}Response>"#
    )
}
