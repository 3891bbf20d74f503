use std::fmt;

/// Marker text carried by the note of every "product not found" record.
/// Classification matches on it, so it must stay stable across releases.
pub const NOT_FOUND_NOTE: &str = "product not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// HTTP 429: the token budget of the API key is exhausted.
    RateLimited,
    /// Request did not complete or the body was unusable.
    TransientNetwork(String),
    Timeout,
    NotFound,
    /// Offers exist but none of them carried a usable price.
    NoPriceAvailable { hit_count: usize },
    /// Resolution failed in a way nobody anticipated; caught at the item boundary.
    Unexpected(String),
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::RateLimited => write!(f, "rate limited"),
            QuoteError::TransientNetwork(cause) => write!(f, "network error: {cause}"),
            QuoteError::Timeout => write!(f, "request timed out"),
            QuoteError::NotFound => write!(f, "{NOT_FOUND_NOTE}"),
            QuoteError::NoPriceAvailable { hit_count } => {
                write!(f, "no price available ({hit_count} offers)")
            }
            QuoteError::Unexpected(cause) => write!(f, "unexpected error: {cause}"),
        }
    }
}

/// Result of one resolution attempt for one code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceQuoteOutcome {
    pub title: Option<String>,
    pub price_minor: Option<i64>,
    pub error: Option<QuoteError>,
    pub offer_hit_count: usize,
}

impl PriceQuoteOutcome {
    pub fn priced(title: Option<String>, price_minor: i64, offer_hit_count: usize) -> Self {
        Self {
            title,
            price_minor: Some(price_minor),
            error: None,
            offer_hit_count,
        }
    }

    pub fn failed(error: QuoteError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Failure that still knows which product it was about.
    pub fn failed_with_title(title: Option<String>, error: QuoteError, offer_hit_count: usize) -> Self {
        Self {
            title,
            price_minor: None,
            error: Some(error),
            offer_hit_count,
        }
    }
}
