//! Credential and response fixtures

use chrono::{Duration, Utc};
use ebay_trading_domain::{AppConfig, Credential, CredentialConfig};

pub fn oauth_config() -> CredentialConfig {
    CredentialConfig {
        email: "seller@example.com".to_string(),
        user_id: "test-seller".to_string(),
        token: Some("v^1.1#token".to_string()),
        auth_type: "oauth".to_string(),
        expire: Utc::now() + Duration::days(30),
        environment: "sandbox".to_string(),
        app_config: None,
    }
}

pub fn oauth_credential() -> Credential {
    Credential::from_config(oauth_config()).unwrap()
}

pub fn authnauth_credential() -> Credential {
    Credential::from_config(CredentialConfig {
        auth_type: "authnauth".to_string(),
        environment: "production".to_string(),
        app_config: Some(AppConfig {
            client_id: "app-id".to_string(),
            dev_id: "dev-id".to_string(),
            cert_id: "cert-id".to_string(),
        }),
        ..oauth_config()
    })
    .unwrap()
}

/// One `GetSellerList` page holding items `first..first + count`.
pub fn seller_list_page(total_pages: u32, first: u32, count: u32) -> String {
    let items: String = (first..first + count)
        .map(|id| format!("<Item><ItemID>{id}</ItemID><Title>Item {id}</Title></Item>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<GetSellerListResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Ack>Success</Ack>
  <PaginationResult>
    <TotalNumberOfPages>{total_pages}</TotalNumberOfPages>
  </PaginationResult>
  <ItemArray>{items}</ItemArray>
</GetSellerListResponse>"#
    )
}

/// One `GetOrders` page holding orders `first..first + count`.
pub fn orders_page(total_pages: u32, first: u32, count: u32) -> String {
    let orders: String = (first..first + count)
        .map(|id| format!("<Order><OrderID>{id}</OrderID><OrderStatus>Completed</OrderStatus></Order>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<GetOrdersResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Ack>Success</Ack>
  <PaginationResult>
    <TotalNumberOfPages>{total_pages}</TotalNumberOfPages>
  </PaginationResult>
  <OrderArray>{orders}</OrderArray>
</GetOrdersResponse>"#
    )
}

pub fn failure(call: &str, code: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<{call}Response xmlns="urn:ebay:apis:eBLBaseComponents">
  <Ack>Failure</Ack>
  <Errors>
    <ShortMessage>{message}</ShortMessage>
    <LongMessage>{message}</LongMessage>
    <ErrorCode>{code}</ErrorCode>
    <SeverityCode>Error</SeverityCode>
  </Errors>
</{call}Response>"#
    )
}

pub fn success(call: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<{call}Response xmlns="urn:ebay:apis:eBLBaseComponents"><Ack>Success</Ack>{inner}</{call}Response>"#
    )
}
