//! Error types used throughout the client

use std::fmt;

use thiserror::Error;

/// One entry of the vendor's `Errors` list on a failed call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorDetail {
    /// `ErrorCode`
    pub code: Option<String>,
    /// `ShortMessage`
    pub short_message: Option<String>,
    /// `LongMessage`
    pub long_message: Option<String>,
    /// `SeverityCode`, `Error` or `Warning`
    pub severity: Option<String>,
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .long_message
            .as_deref()
            .or(self.short_message.as_deref())
            .unwrap_or("no message");

        match &self.code {
            Some(code) => write!(f, "[{code}] {message}"),
            None => f.write_str(message),
        }
    }
}

/// Main error type for the Trading API client
#[derive(Error, Debug)]
pub enum TradingError {
    /// Credential has no usable token.
    #[error("No auth token provided")]
    NoAuthToken,

    /// `authnauth` credential without complete application keys.
    #[error("Auth'n'Auth requires appConfig with clientId, devId and certId")]
    InvalidAuthNAuthConfig,

    /// Unknown `authType` value.
    #[error("Auth type not supported: {0}")]
    NotSupportedAuthType(String),

    /// Options rejected before any request was sent.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure: timeout, refused connection, reset.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body, unparsed
        body: String,
    },

    /// Response body is not well-formed XML.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Vendor answered with `Ack` = `Failure`.
    #[error("{call} failed: {}", join_details(.errors))]
    Api {
        /// Call name
        call: String,
        /// Entries of the response's `Errors` list
        errors: Vec<ApiErrorDetail>,
    },

    /// XML writer failure.
    #[error("Failed to build request envelope: {0}")]
    Envelope(String),

    /// Broken internal invariant.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_details(errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Result type alias for Trading API operations
pub type Result<T> = std::result::Result<T, TradingError>;
