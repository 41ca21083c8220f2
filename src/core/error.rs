//! Error taxonomy for exchange rate lookups.

use thiserror::Error;

/// Errors returned by a conversion.
///
/// Validation variants are produced before any request is sent. Parse
/// failures of the JSON payload never surface on their own; they only
/// switch the parser over to the HTML pattern.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("Amount must be a number greater than 0, got {0}")]
    InvalidAmount(f64),

    #[error("Invalid currency code: {0}. Expected 3 uppercase letters (e.g. USD, EUR, JPY)")]
    InvalidCurrencyCode(String),

    #[error("Invalid provider base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {status}: {status_text}")]
    HttpError { status: u16, status_text: String },

    #[error("Unable to parse exchange rate from response")]
    UnparsableRate,

    #[error("Invalid exchange rate value: {0}")]
    InvalidRate(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        ExchangeError::NetworkError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_message_names_value() {
        let err = ExchangeError::InvalidCurrencyCode("usd".to_string());
        let msg = err.to_string();
        assert!(msg.contains("currency code"));
        assert!(msg.contains("usd"));
    }

    #[test]
    fn test_http_error_message() {
        let err = ExchangeError::HttpError {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }
}
