//! Conversions from external infrastructure errors into domain errors.

use ebay_trading_domain::TradingError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TradingError);

impl From<InfraError> for TradingError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TradingError> for InfraError {
    fn from(value: TradingError) -> Self {
        InfraError(value)
    }
}

trait IntoTradingError {
    fn into_trading(self) -> TradingError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TradingError */
/* -------------------------------------------------------------------------- */

impl IntoTradingError for HttpError {
    fn into_trading(self) -> TradingError {
        if self.is_timeout() {
            return TradingError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TradingError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return TradingError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return TradingError::Http {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        TradingError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_trading())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
