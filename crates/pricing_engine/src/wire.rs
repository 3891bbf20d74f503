//! Decoding of the product endpoint's JSON body.

use pricing_core::{Offer, ProductListing};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Stats fields holding the curated buy-box price, in priority order.
const BUY_BOX_FIELDS: [&str; 3] = [
    "buyBoxPrice",
    "buyBoxShippingPrice",
    "current_BUY_BOX_SHIPPING",
];

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response carried no product data")]
    MissingProducts,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    products: Option<Vec<Value>>,
}

/// Fields are kept as raw values so one odd field never sinks the product.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProduct {
    title: Option<Value>,
    stats: Option<Value>,
    offers: Option<Value>,
    #[serde(rename = "liveOffersOrder")]
    live_offers_order: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireOffer {
    price: Option<Value>,
    shipping: Option<Value>,
    #[serde(rename = "isPrime")]
    is_prime: Option<Value>,
}

/// Decodes a product response. `Ok(None)` means the lookup matched nothing.
pub(crate) fn decode_listing(body: &[u8]) -> Result<Option<ProductListing>, DecodeError> {
    let response: ProductResponse = serde_json::from_slice(body)?;
    let products = response.products.ok_or(DecodeError::MissingProducts)?;
    Ok(products.into_iter().next().map(|raw| {
        let product = serde_json::from_value(raw).unwrap_or_default();
        into_listing(product)
    }))
}

fn into_listing(product: WireProduct) -> ProductListing {
    let primary_candidates = product
        .stats
        .as_ref()
        .and_then(Value::as_object)
        .map(|stats| {
            BUY_BOX_FIELDS
                .iter()
                .filter_map(|field| stats.get(*field).and_then(as_minor))
                .collect()
        })
        .unwrap_or_default();

    // Unreadable entries stay in place as price-less offers so display
    // indexes keep pointing at the right element.
    let offers = array_of(product.offers)
        .into_iter()
        .map(|raw| {
            let offer: WireOffer = serde_json::from_value(raw).unwrap_or_default();
            Offer {
                unit_price: offer.price.as_ref().and_then(as_minor),
                shipping: offer.shipping.as_ref().and_then(as_minor),
                preferred_fulfillment: offer.is_prime.as_ref().is_some_and(is_truthy),
            }
        })
        .collect();

    let display_order = array_of(product.live_offers_order)
        .iter()
        .filter_map(Value::as_u64)
        .filter_map(|index| usize::try_from(index).ok())
        .collect();

    let title = match product.title {
        Some(Value::String(title)) if !title.is_empty() => Some(title),
        _ => None,
    };

    ProductListing {
        title,
        primary_candidates,
        offers,
        display_order,
    }
}

fn array_of(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Numeric JSON value truncated to integer minor units. Values outside the
/// `i64` range are rejected rather than saturated.
fn as_minor(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(int) = n.as_i64() {
        return Some(int);
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    n.as_f64()
        .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}
