//! Trading API constants
//!
//! Centralized location for the vendor endpoints, protocol headers and
//! envelope constants used throughout the client.

// Endpoints
pub const SANDBOX_API_URL: &str = "https://api.sandbox.ebay.com/ws/api.dll";
pub const PRODUCTION_API_URL: &str = "https://api.ebay.com/ws/api.dll";

// Protocol
pub const COMPATIBILITY_LEVEL: &str = "1061";
pub const SITE_ID: &str = "0";
pub const CONTENT_TYPE_XML: &str = "text/xml";
pub const XML_NAMESPACE: &str = "urn:ebay:apis:eBLBaseComponents";

// Header names
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_COMPATIBILITY_LEVEL: &str = "X-EBAY-API-COMPATIBILITY-LEVEL";
pub const HEADER_SITE_ID: &str = "X-EBAY-API-SITEID";
pub const HEADER_IAF_TOKEN: &str = "X-EBAY-API-IAF-TOKEN";
pub const HEADER_APP_NAME: &str = "X-EBAY-API-APP-NAME";
pub const HEADER_DEV_NAME: &str = "X-EBAY-API-DEV-NAME";
pub const HEADER_CERT_NAME: &str = "X-EBAY-API-CERT-NAME";
pub const HEADER_CALL_NAME: &str = "X-EBAY-API-CALL-NAME";

// HTTP defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
