//! Tiered price selection over a decoded product listing.
//!
//! Tiers, first match wins:
//! 1. the curated primary-offer (buy-box) price, taken verbatim;
//! 2. the first preferred-fulfillment offer in display order, else the first offer;
//! 3. the chosen offer's unit price plus shipping, when the sum fits in `i64`.
//!
//! Listings without any usable price fall back to `NoPriceAvailable` or
//! `NotFound` depending on whether offers were present at all.

use crate::{PriceQuoteOutcome, QuoteError};

/// One marketplace offer as reported by the pricing API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Offer {
    pub unit_price: Option<i64>,
    pub shipping: Option<i64>,
    /// Expedited/verified fulfillment programme badge.
    pub preferred_fulfillment: bool,
}

/// A matched product, reduced to the fields the selection policy reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductListing {
    pub title: Option<String>,
    /// Buy-box style price fields in priority order. Non-positive values are ignored.
    pub primary_candidates: Vec<i64>,
    pub offers: Vec<Offer>,
    /// Offer indexes in the order the API says they are displayed.
    pub display_order: Vec<usize>,
}

impl ProductListing {
    /// Offers reordered by the declared display order. Out-of-range indexes are
    /// dropped; when nothing survives, the raw list order is used.
    pub fn ordered_offers(&self) -> Vec<&Offer> {
        let ordered: Vec<&Offer> = self
            .display_order
            .iter()
            .filter_map(|&index| self.offers.get(index))
            .collect();
        if ordered.is_empty() {
            self.offers.iter().collect()
        } else {
            ordered
        }
    }
}

pub fn select_price(listing: &ProductListing) -> PriceQuoteOutcome {
    let title = listing.title.clone();

    if let Some(&price) = listing.primary_candidates.iter().find(|&&p| p > 0) {
        return PriceQuoteOutcome::priced(title, price, 0);
    }

    let hit_count = listing.offers.len();
    let ordered = listing.ordered_offers();
    let chosen = ordered
        .iter()
        .find(|offer| offer.preferred_fulfillment)
        .or_else(|| ordered.first());

    if let Some(offer) = chosen {
        if let Some(unit) = offer.unit_price.filter(|&p| p > 0) {
            // Negative shipping is the API's "unknown" marker, same as absent.
            let shipping = offer.shipping.filter(|&s| s > 0).unwrap_or(0);
            if let Some(total) = unit.checked_add(shipping) {
                return PriceQuoteOutcome::priced(title, total, hit_count);
            }
        }
    }

    if hit_count > 0 {
        PriceQuoteOutcome::failed_with_title(
            title,
            QuoteError::NoPriceAvailable { hit_count },
            hit_count,
        )
    } else {
        PriceQuoteOutcome::failed_with_title(title, QuoteError::NotFound, 0)
    }
}
