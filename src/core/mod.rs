//! Core types and abstractions for currency conversion

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use conversion::{ConversionOptions, ConversionRequest, ConversionResult};
pub use currency::{ExchangeRateProvider, RateQuote, SUPPORTED_CURRENCIES};
pub use error::ExchangeError;
