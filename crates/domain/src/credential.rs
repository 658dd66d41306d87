//! Credential model
//!
//! A [`Credential`] is built once from a raw [`CredentialConfig`], validated,
//! and never mutated afterwards. It is safe to share across concurrent calls.
//!
//! Two mutually exclusive schemes are supported:
//! - `oauth`: a bearer user token sent as `X-EBAY-API-IAF-TOKEN`
//! - `authnauth`: a named application identified by the `appConfig` keys

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    COMPATIBILITY_LEVEL, CONTENT_TYPE_XML, HEADER_APP_NAME, HEADER_CERT_NAME,
    HEADER_COMPATIBILITY_LEVEL, HEADER_CONTENT_TYPE, HEADER_DEV_NAME, HEADER_IAF_TOKEN,
    HEADER_SITE_ID, PRODUCTION_API_URL, SANDBOX_API_URL, SITE_ID,
};
use crate::errors::{Result, TradingError};
use crate::impl_wire_str_conversions;

/// Authentication scheme selector as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// `oauth`: bearer user token
    OAuth,
    /// `authnauth`: token plus registered application keys
    AuthNAuth,
}

impl_wire_str_conversions!(AuthType {
    OAuth => "oauth",
    AuthNAuth => "authnauth",
});

/// Target environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// `sandbox`
    Sandbox,
    /// `production`
    Production,
}

impl_wire_str_conversions!(Environment {
    Sandbox => "sandbox",
    Production => "production",
});

impl Environment {
    /// Trading API endpoint for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_API_URL,
            Self::Production => PRODUCTION_API_URL,
        }
    }
}

/// Developer keys of a registered application (Auth'n'Auth scheme).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Application id, sent as `X-EBAY-API-APP-NAME`.
    pub client_id: String,
    /// Developer id, sent as `X-EBAY-API-DEV-NAME`.
    pub dev_id: String,
    /// Certificate id, sent as `X-EBAY-API-CERT-NAME`. Never serialized.
    #[serde(skip_serializing)]
    pub cert_id: String,
}

impl AppConfig {
    fn is_complete(&self) -> bool {
        [&self.client_id, &self.dev_id, &self.cert_id].iter().all(|v| !v.trim().is_empty())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("client_id", &self.client_id)
            .field("dev_id", &self.dev_id)
            .field("cert_id", &"<redacted>")
            .finish()
    }
}

/// Raw credential configuration, exactly as read from env or a config file.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialConfig {
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Seller user id.
    #[serde(default)]
    pub user_id: String,
    /// User token; required whatever the scheme.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// `oauth` or `authnauth`, any case.
    pub auth_type: String,
    /// Token expiry, RFC 3339.
    pub expire: DateTime<Utc>,
    /// `sandbox` or `production`, any case.
    pub environment: String,
    /// Application keys, required for `authnauth`.
    #[serde(default)]
    pub app_config: Option<AppConfig>,
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("auth_type", &self.auth_type)
            .field("expire", &self.expire)
            .field("environment", &self.environment)
            .field("app_config", &self.app_config)
            .finish()
    }
}

/// Scheme-specific part of a validated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// Token sent as `X-EBAY-API-IAF-TOKEN: Bearer <token>`.
    OAuth,
    /// Application keys sent as named headers.
    AuthNAuth(AppConfig),
}

impl AuthScheme {
    /// Selector this scheme was built from.
    pub fn auth_type(&self) -> AuthType {
        match self {
            Self::OAuth => AuthType::OAuth,
            Self::AuthNAuth(_) => AuthType::AuthNAuth,
        }
    }
}

/// Validated, immutable credential.
#[derive(Clone)]
pub struct Credential {
    email: String,
    user_id: String,
    token: String,
    expire: DateTime<Utc>,
    environment: Environment,
    scheme: AuthScheme,
}

impl Credential {
    /// Validate a raw configuration and freeze it.
    ///
    /// Checks run in a fixed order: token, auth type, app keys, environment.
    ///
    /// # Errors
    /// - [`TradingError::NoAuthToken`] when the token is missing or blank
    /// - [`TradingError::NotSupportedAuthType`] for an unknown `authType`
    /// - [`TradingError::InvalidAuthNAuthConfig`] when `authnauth` lacks keys
    /// - [`TradingError::Config`] for an unknown environment
    pub fn from_config(config: CredentialConfig) -> Result<Self> {
        let token = match config.token {
            Some(token) if !token.trim().is_empty() => token,
            _ => return Err(TradingError::NoAuthToken),
        };

        let auth_type: AuthType =
            config.auth_type.parse().map_err(TradingError::NotSupportedAuthType)?;

        let scheme = match auth_type {
            AuthType::OAuth => AuthScheme::OAuth,
            AuthType::AuthNAuth => match config.app_config {
                Some(app) if app.is_complete() => AuthScheme::AuthNAuth(app),
                _ => return Err(TradingError::InvalidAuthNAuthConfig),
            },
        };

        let environment: Environment = config.environment.parse().map_err(|value| {
            TradingError::Config(format!(
                "unsupported environment '{value}', expected 'sandbox' or 'production'"
            ))
        })?;

        Ok(Self {
            email: config.email,
            user_id: config.user_id,
            token,
            expire: config.expire,
            environment,
            scheme,
        })
    }

    /// Account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Seller user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// User token, never blank.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Token expiry.
    pub fn expire(&self) -> DateTime<Utc> {
        self.expire
    }

    /// Target environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Scheme-specific part of the credential.
    pub fn scheme(&self) -> &AuthScheme {
        &self.scheme
    }

    /// Authentication scheme selector.
    pub fn auth_type(&self) -> AuthType {
        self.scheme.auth_type()
    }

    /// True iff the expiry instant is at or before the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// True iff the expiry instant is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire <= now
    }

    /// Trading API endpoint of the credential's environment.
    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }

    /// Headers that authenticate a request under this credential's scheme.
    pub fn auth_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_XML.to_string());
        headers.insert(HEADER_COMPATIBILITY_LEVEL.to_string(), COMPATIBILITY_LEVEL.to_string());
        headers.insert(HEADER_SITE_ID.to_string(), SITE_ID.to_string());

        match &self.scheme {
            AuthScheme::OAuth => {
                headers.insert(HEADER_IAF_TOKEN.to_string(), format!("Bearer {}", self.token));
            }
            AuthScheme::AuthNAuth(app) => {
                headers.insert(HEADER_APP_NAME.to_string(), app.client_id.clone());
                headers.insert(HEADER_DEV_NAME.to_string(), app.dev_id.clone());
                headers.insert(HEADER_CERT_NAME.to_string(), app.cert_id.clone());
            }
        }

        headers
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .field("expire", &self.expire)
            .field("environment", &self.environment)
            .field("scheme", &self.scheme)
            .finish()
    }
}
