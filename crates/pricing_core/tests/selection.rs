use pricing_core::{select_price, Offer, PriceQuoteOutcome, ProductListing, QuoteError};

fn offer(unit: Option<i64>, shipping: Option<i64>, prime: bool) -> Offer {
    Offer {
        unit_price: unit,
        shipping,
        preferred_fulfillment: prime,
    }
}

fn listing(offers: Vec<Offer>) -> ProductListing {
    ProductListing {
        title: Some("Green tea 500ml".to_string()),
        offers,
        ..ProductListing::default()
    }
}

#[test]
fn primary_price_is_used_verbatim() {
    for price in [1, 980, 1200, 45_000] {
        let mut product = listing(vec![offer(Some(100), Some(500), true)]);
        product.primary_candidates = vec![price];
        let outcome = select_price(&product);
        assert_eq!(outcome.price_minor, Some(price));
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.title.as_deref(), Some("Green tea 500ml"));
    }
}

#[test]
fn non_positive_primary_candidates_fall_through() {
    let mut product = listing(vec![offer(Some(700), None, false)]);
    product.primary_candidates = vec![-1, 0, 850];
    assert_eq!(select_price(&product).price_minor, Some(850));

    product.primary_candidates = vec![-1, 0];
    assert_eq!(select_price(&product).price_minor, Some(700));
}

#[test]
fn offer_total_adds_shipping_when_present() {
    let with_shipping = select_price(&listing(vec![offer(Some(1000), Some(350), false)]));
    assert_eq!(with_shipping.price_minor, Some(1350));
    assert_eq!(with_shipping.offer_hit_count, 1);

    let without_shipping = select_price(&listing(vec![offer(Some(1000), None, false)]));
    assert_eq!(without_shipping.price_minor, Some(1000));
}

#[test]
fn preferred_fulfillment_offer_wins_over_first() {
    let product = listing(vec![
        offer(Some(900), Some(0), false),
        offer(Some(1100), Some(100), true),
    ]);
    let outcome = select_price(&product);
    assert_eq!(outcome.price_minor, Some(1200));
    assert_eq!(outcome.offer_hit_count, 2);
}

#[test]
fn display_order_decides_which_offer_is_first() {
    let mut product = listing(vec![
        offer(Some(900), None, false),
        offer(Some(1500), None, false),
    ]);
    product.display_order = vec![1, 0];
    assert_eq!(select_price(&product).price_minor, Some(1500));

    // Indexes outside the list are ignored; nothing left means list order.
    product.display_order = vec![7, 9];
    assert_eq!(select_price(&product).price_minor, Some(900));
}

#[test]
fn preferred_offer_is_searched_in_display_order() {
    let mut product = listing(vec![
        offer(Some(100), None, true),
        offer(Some(200), None, false),
        offer(Some(300), None, true),
    ]);
    product.display_order = vec![1, 2];
    assert_eq!(select_price(&product).price_minor, Some(300));
}

#[test]
fn empty_offer_list_is_not_found() {
    let outcome = select_price(&listing(Vec::new()));
    assert_eq!(outcome.error, Some(QuoteError::NotFound));
    assert_eq!(outcome.price_minor, None);
    assert_eq!(outcome.offer_hit_count, 0);
}

#[test]
fn offers_without_price_report_hit_count() {
    let product = listing(vec![
        offer(None, Some(100), false),
        offer(Some(0), None, true),
        offer(Some(-1), None, false),
    ]);
    let outcome = select_price(&product);
    assert_eq!(
        outcome,
        PriceQuoteOutcome::failed_with_title(
            Some("Green tea 500ml".to_string()),
            QuoteError::NoPriceAvailable { hit_count: 3 },
            3,
        )
    );
    assert_eq!(
        outcome.error.unwrap().to_string(),
        "no price available (3 offers)"
    );
}

#[test]
fn overflowing_offer_total_is_no_price() {
    let product = listing(vec![offer(Some(i64::MAX), Some(1), false)]);
    let outcome = select_price(&product);
    assert_eq!(outcome.price_minor, None);
    assert_eq!(
        outcome.error,
        Some(QuoteError::NoPriceAvailable { hit_count: 1 })
    );

    let fits = listing(vec![offer(Some(i64::MAX), Some(-1), false)]);
    assert_eq!(select_price(&fits).price_minor, Some(i64::MAX));
}
