use std::time::{Duration, Instant};

use pricing_core::{select_price, PriceQuoteOutcome, ProductCode, QuoteError};
use pricing_logging::{price_debug, price_warn};
use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::wire::decode_listing;

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub endpoint: String,
    pub api_key: String,
    /// Marketplace id understood by the pricing API (5 = Japan).
    pub domain: u32,
    /// Number of offers requested per product.
    pub offers: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.keepa.com/product".to_string(),
            api_key: String::new(),
            domain: 5,
            offers: 20,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
}

/// Resolves one product code to a price decision with exactly one API call.
///
/// Implementations never retry; failures come back as data in the outcome.
#[async_trait::async_trait]
pub trait PriceResolver: Send + Sync {
    async fn resolve(&self, code: &ProductCode) -> PriceQuoteOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpPriceResolver {
    settings: ResolverSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpPriceResolver {
    pub fn new(settings: ResolverSettings) -> Result<Self, ResolverError> {
        let endpoint =
            Url::parse(&settings.endpoint).map_err(|err| ResolverError::InvalidEndpoint {
                endpoint: settings.endpoint.clone(),
                reason: err.to_string(),
            })?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ResolverError::Client(err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    fn request_url(&self, code: &ProductCode) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.settings.api_key)
            .append_pair("domain", &self.settings.domain.to_string())
            .append_pair("code", code.as_str())
            .append_pair("history", "0")
            .append_pair("offers", &self.settings.offers.to_string())
            .append_pair("onlyLiveOffers", "0")
            .append_pair("buybox", "1")
            .append_pair("stats", "0");
        url
    }
}

#[async_trait::async_trait]
impl PriceResolver for HttpPriceResolver {
    async fn resolve(&self, code: &ProductCode) -> PriceQuoteOutcome {
        let started = Instant::now();
        price_debug!("Resolving code={}", code);

        let response = match self.client.get(self.request_url(code)).send().await {
            Ok(response) => response,
            Err(err) => return PriceQuoteOutcome::failed(map_reqwest_error(err)),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            price_warn!("Rate limited while resolving code={}", code);
            return PriceQuoteOutcome::failed(QuoteError::RateLimited);
        }
        if !status.is_success() {
            return PriceQuoteOutcome::failed(QuoteError::TransientNetwork(format!(
                "http status {}",
                status.as_u16()
            )));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return PriceQuoteOutcome::failed(map_reqwest_error(err)),
        };
        if started.elapsed() > self.settings.request_timeout {
            return PriceQuoteOutcome::failed(QuoteError::Timeout);
        }

        match decode_listing(&body) {
            Ok(Some(listing)) => select_price(&listing),
            Ok(None) => PriceQuoteOutcome::failed(QuoteError::NotFound),
            Err(err) => PriceQuoteOutcome::failed(QuoteError::TransientNetwork(err.to_string())),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> QuoteError {
    if err.is_timeout() {
        return QuoteError::Timeout;
    }
    QuoteError::TransientNetwork(err.to_string())
}
