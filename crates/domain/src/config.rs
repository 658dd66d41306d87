//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::credential::CredentialConfig;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Raw credential, validated when the client is built.
    pub credentials: CredentialConfig,
    /// Transport settings; defaults apply when the section is absent.
    #[serde(default)]
    pub http: HttpConfig,
    /// Overrides the environment's endpoint (proxies, test servers).
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `User-Agent` header; the reqwest default when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS, user_agent: None }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
