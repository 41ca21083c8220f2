//! Entry point for conversions: validates options, resolves them against
//! the configured defaults and applies the fetched rate to the amount.

use crate::core::config::AppConfig;
use crate::core::{
    ConversionOptions, ConversionRequest, ConversionResult, ExchangeError, ExchangeRateProvider,
    SUPPORTED_CURRENCIES,
};
use crate::providers::naver::NaverRateProvider;
use tracing::{debug, info};

pub struct Converter<P: ExchangeRateProvider = NaverRateProvider> {
    provider: P,
    defaults: ConversionRequest,
}

impl Converter<NaverRateProvider> {
    /// Converter backed by the calculator endpoint at `base_url`.
    pub fn naver(base_url: &str) -> Result<Self, ExchangeError> {
        Ok(Self::new(NaverRateProvider::new(base_url)?))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ExchangeError> {
        let provider = NaverRateProvider::new(&config.provider.base_url)?;
        Ok(Self::with_defaults(provider, config.defaults.clone()))
    }
}

impl<P: ExchangeRateProvider> Converter<P> {
    pub fn new(provider: P) -> Self {
        Self::with_defaults(provider, ConversionRequest::default())
    }

    pub fn with_defaults(provider: P, defaults: ConversionRequest) -> Self {
        Converter { provider, defaults }
    }

    pub async fn convert(&self, options: ConversionOptions) -> Result<ConversionResult, ExchangeError> {
        options.validate()?;
        let request = options.resolve(&self.defaults);
        debug!(?request, "Resolved conversion request");
        request.validate()?;

        let quote = self.provider.fetch_rate(&request).await?;
        let result = ConversionResult::new(&request, quote);
        info!(
            from = %result.from,
            to = %result.to,
            rate = result.rate,
            result = result.result,
            "Converted amount"
        );
        Ok(result)
    }

    pub async fn usd_to_krw(&self, amount: f64) -> Result<ConversionResult, ExchangeError> {
        self.convert(ConversionOptions::pair("USD", "KRW", amount)).await
    }

    pub async fn krw_to_usd(&self, amount: f64) -> Result<ConversionResult, ExchangeError> {
        self.convert(ConversionOptions::pair("KRW", "USD", amount)).await
    }

    pub async fn eur_to_krw(&self, amount: f64) -> Result<ConversionResult, ExchangeError> {
        self.convert(ConversionOptions::pair("EUR", "KRW", amount)).await
    }

    pub async fn jpy_to_krw(&self, amount: f64) -> Result<ConversionResult, ExchangeError> {
        self.convert(ConversionOptions::pair("JPY", "KRW", amount)).await
    }

    pub async fn cny_to_krw(&self, amount: f64) -> Result<ConversionResult, ExchangeError> {
        self.convert(ConversionOptions::pair("CNY", "KRW", amount)).await
    }
}

pub fn supported_currencies() -> &'static [&'static str] {
    SUPPORTED_CURRENCIES
}
