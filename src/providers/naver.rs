use super::rate_parser::parse_rate;
use crate::core::{ConversionRequest, ExchangeError, ExchangeRateProvider, RateQuote};
use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

/// Path of the calculator content module on the mobile search host.
pub const CALCULATOR_PATH: &str = "/p/csearch/content/qapirender.nhn";

// "exchange rate"; selects the currency calculator content together with
// the fixed `key`, `where` and `u7` parameters.
const SEARCH_TERM: &str = "환율";

pub struct NaverRateProvider {
    endpoint: Url,
    client: reqwest::Client,
}

impl NaverRateProvider {
    /// Fails with `InvalidBaseUrl` unless `base_url` is an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ExchangeError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), CALCULATOR_PATH);
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| ExchangeError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ExchangeError::InvalidBaseUrl(format!(
                "{base_url}: unsupported scheme {}",
                endpoint.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("naverfx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(NaverRateProvider { endpoint, client })
    }

    /// Builds the calculator URL for `request`.
    ///
    /// The search term is percent-encoded before it is added to the query,
    /// so it ends up encoded twice on the wire. The upstream expects exactly
    /// this shape.
    pub fn build_url(&self, request: &ConversionRequest) -> Url {
        let search_term: String = url::form_urlencoded::byte_serialize(SEARCH_TERM.as_bytes()).collect();
        let params = [
            ("key", "calculator".to_string()),
            ("pkid", request.content_id.to_string()),
            ("q", search_term),
            ("where", "m".to_string()),
            ("u1", request.bank.clone()),
            ("u2", request.amount.to_string()),
            ("u3", request.from.clone()),
            ("u4", request.to.clone()),
            ("u6", request.unit.clone()),
            ("u7", "0".to_string()),
            ("u8", request.direction.clone()),
        ];

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(&params);
        url
    }
}

#[async_trait]
impl ExchangeRateProvider for NaverRateProvider {
    #[instrument(
        name = "NaverRateFetch",
        skip(self, request),
        fields(from = %request.from, to = %request.to)
    )]
    async fn fetch_rate(&self, request: &ConversionRequest) -> Result<RateQuote, ExchangeError> {
        let url = self.build_url(request);
        debug!("Requesting exchange rate from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::HttpError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.text().await?;
        debug!(len = body.len(), "Received calculator response");

        let rate = parse_rate(&body)?;
        debug!(rate, "Parsed exchange rate");

        Ok(RateQuote { rate, raw: body })
    }
}
