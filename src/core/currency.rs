//! Currency codes and the exchange rate provider abstraction

use super::conversion::ConversionRequest;
use super::error::ExchangeError;
use async_trait::async_trait;

/// Currencies known to work with the upstream calculator. Informational
/// only; conversion accepts any well-formed code.
pub const SUPPORTED_CURRENCIES: &[&str] = &[
    "USD", "EUR", "JPY", "CNY", "GBP", "KRW", "AUD", "CAD", "CHF", "HKD", "SGD", "THB",
];

/// A rate as read from the upstream, before the amount is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    /// Units of the target currency per unit of the source currency.
    pub rate: f64,
    pub raw: String,
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn fetch_rate(&self, request: &ConversionRequest) -> Result<RateQuote, ExchangeError>;
}
