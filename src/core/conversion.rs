//! Conversion request and result types, plus the input guard that runs
//! before anything is sent upstream.

use super::currency::RateQuote;
use super::error::ExchangeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CURRENCY_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{3}$").expect("currency code pattern is valid")
});

/// A fully resolved conversion request.
///
/// `Default` carries the fallback values used for any option the caller
/// leaves unset. `bank`, `unit`, `direction` and `content_id` are passed to
/// the upstream as-is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversionRequest {
    pub bank: String,
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub unit: String,
    pub direction: String,
    pub content_id: u32,
}

impl ConversionRequest {
    /// Same checks as [`ConversionOptions::validate`], applied to every
    /// field since configured defaults are filled in here too.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        check_amount(self.amount)?;
        check_currency_code(&self.from)?;
        check_currency_code(&self.to)
    }
}

impl Default for ConversionRequest {
    fn default() -> Self {
        ConversionRequest {
            bank: "keb".to_string(),
            amount: 1.0,
            from: "USD".to_string(),
            to: "KRW".to_string(),
            unit: "standardUnit".to_string(),
            direction: "down".to_string(),
            content_id: 141,
        }
    }
}

fn check_amount(amount: f64) -> Result<(), ExchangeError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ExchangeError::InvalidAmount(amount));
    }
    Ok(())
}

fn check_currency_code(code: &str) -> Result<(), ExchangeError> {
    if !CURRENCY_CODE.is_match(code) {
        return Err(ExchangeError::InvalidCurrencyCode(code.to_string()));
    }
    Ok(())
}

/// Caller supplied options. Unset fields fall back to a [`ConversionRequest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionOptions {
    pub bank: Option<String>,
    pub amount: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub unit: Option<String>,
    pub direction: Option<String>,
    pub content_id: Option<u32>,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a fixed currency pair.
    pub fn pair(from: &str, to: &str, amount: f64) -> Self {
        ConversionOptions {
            amount: Some(amount),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            ..Self::default()
        }
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn from_currency(mut self, code: impl Into<String>) -> Self {
        self.from = Some(code.into());
        self
    }

    pub fn to_currency(mut self, code: impl Into<String>) -> Self {
        self.to = Some(code.into());
        self
    }

    /// Rejects a non-positive or non-finite amount and malformed currency
    /// codes. The remaining fields are not checked.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if let Some(amount) = self.amount {
            check_amount(amount)?;
        }
        for code in [&self.from, &self.to].into_iter().flatten() {
            check_currency_code(code)?;
        }
        Ok(())
    }

    /// Merges these options over `defaults`.
    pub fn resolve(self, defaults: &ConversionRequest) -> ConversionRequest {
        ConversionRequest {
            bank: self.bank.unwrap_or_else(|| defaults.bank.clone()),
            amount: self.amount.unwrap_or(defaults.amount),
            from: self.from.unwrap_or_else(|| defaults.from.clone()),
            to: self.to.unwrap_or_else(|| defaults.to.clone()),
            unit: self.unit.unwrap_or_else(|| defaults.unit.clone()),
            direction: self.direction.unwrap_or_else(|| defaults.direction.clone()),
            content_id: self.content_id.unwrap_or(defaults.content_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub result: f64,
    /// Upstream body the rate was read from.
    pub raw: String,
}

impl ConversionResult {
    pub fn new(request: &ConversionRequest, quote: RateQuote) -> Self {
        ConversionResult {
            from: request.from.clone(),
            to: request.to.clone(),
            amount: request.amount,
            rate: quote.rate,
            result: round_to_cents(quote.rate * request.amount),
            raw: quote.raw,
        }
    }
}

/// Rounds to 2 decimal places, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
