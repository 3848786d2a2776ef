//! Integration tests for browsing the seeded catalog.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use farmerty_core::{Category, Price};
use farmerty_integration_tests::TestContext;
use farmerty_storefront::catalog::{FilterChip, FilterCriteria, filter};

fn names(products: &[farmerty_storefront::models::Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_default_criteria_return_whole_catalog() {
    let ctx = TestContext::new().unwrap();
    let catalog = ctx.state.catalog();
    assert_eq!(catalog.browse(&FilterCriteria::new()), catalog.products());
}

#[test]
fn test_vegetables_under_five_dollars() {
    let ctx = TestContext::new().unwrap();
    let criteria = FilterCriteria::new()
        .with_category(Category::Vegetables)
        .with_price_range(Decimal::ZERO, Decimal::new(5, 0));

    let products = ctx.state.catalog().browse(&criteria);
    assert_eq!(names(&products), ["Heirloom Tomatoes", "Fresh Spinach"]);

    let cheaper = criteria.with_price_range(Decimal::ZERO, Decimal::new(3, 0));
    let products = ctx.state.catalog().browse(&cheaper);
    assert_eq!(names(&products), ["Fresh Spinach"]);
    assert_eq!(products[0].price, Price::from_cents(299).unwrap());
}

#[test]
fn test_filtering_is_idempotent() {
    let ctx = TestContext::new().unwrap();
    let catalog = ctx.state.catalog();
    let criteria = [
        FilterCriteria::new(),
        FilterCriteria::new().with_organic_only(true),
        FilterCriteria::new().with_query("FRESH"),
        FilterCriteria::new()
            .with_category(Category::Vegetables)
            .with_category(Category::Berries)
            .with_price_range(Decimal::new(3, 0), Decimal::new(10, 0)),
    ];

    for c in &criteria {
        let once = catalog.browse(c);
        let twice = filter(&once, c);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_combined_filters_and_chips() {
    let ctx = TestContext::new().unwrap();
    let mut criteria = FilterCriteria::new()
        .with_organic_only(true)
        .with_query("  fresh ");

    let products = ctx.state.catalog().browse(&criteria);
    assert_eq!(
        names(&products),
        ["Fresh Organic Strawberries", "Fresh Spinach", "Freshly Roasted Coffee Beans"]
    );
    assert_eq!(
        criteria.active_chips(),
        [FilterChip::OrganicOnly, FilterChip::Query("fresh".to_string())]
    );

    criteria.clear();
    assert_eq!(criteria.active_chips(), [FilterChip::Query("fresh".to_string())]);
    assert_eq!(ctx.state.catalog().browse(&criteria).len(), 3);
}

#[test]
fn test_no_matches_is_empty() {
    let ctx = TestContext::new().unwrap();
    let criteria = FilterCriteria::new().with_query("durian");
    assert!(ctx.state.catalog().browse(&criteria).is_empty());
}
