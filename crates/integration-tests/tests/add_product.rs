//! Integration tests for farmer product submissions.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use farmerty_core::Role;
use farmerty_integration_tests::TestContext;
use farmerty_storefront::navigation::Route;
use farmerty_storefront::services::products::{ProductDraft, ProductError};
use farmerty_storefront::services::scope::CancelToken;

fn draft(name: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: "3.25".to_string(),
        unit: "bunch".to_string(),
        description: "Tender leaves, great raw.".to_string(),
        image_url: String::new(),
    }
}

async fn sign_up(ctx: &TestContext, role: Role) {
    ctx.state
        .session()
        .sign_up(
            "Green Valley Farm",
            "hello@greenvalley.farm",
            &SecretString::from("tomatoes"),
            role,
            &CancelToken::never(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_farmer_submission_persists_across_restart() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx, Role::Farmer).await;
    let farmer = ctx.state.session().current();

    let outcome = ctx
        .state
        .products()
        .add_product(farmer.as_ref(), &draft("Purple Kale"), &CancelToken::never())
        .await
        .unwrap();
    assert_eq!(outcome.redirect, Route::Browse);
    assert_eq!(outcome.notice, "Product added successfully!");

    let restarted = ctx.restart().unwrap();
    let stored = restarted.products().submitted_products().unwrap();
    assert_eq!(stored, vec![outcome.value]);

    // Submissions never join the seed catalog.
    assert_eq!(restarted.catalog().products().len(), 8);
}

#[tokio::test]
async fn test_stored_record_shape() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx, Role::Farmer).await;
    let farmer = ctx.state.session().current();
    ctx.state
        .products()
        .add_product(farmer.as_ref(), &draft("Purple Kale"), &CancelToken::never())
        .await
        .unwrap();

    let raw = std::fs::read_to_string(ctx.storage_path()).unwrap();
    let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let list: serde_json::Value =
        serde_json::from_str(map["farmerty_products"].as_str().unwrap()).unwrap();

    let record = &list[0];
    assert_eq!(record["name"], "Purple Kale");
    assert_eq!(record["price"], serde_json::json!(3.25));
    assert_eq!(record["imageUrl"], "/placeholder.svg");
    assert_eq!(record["farmerName"], "Green Valley Farm");
    assert!(record["createdAt"].is_string());
}

#[tokio::test]
async fn test_consumer_is_refused() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx, Role::Consumer).await;
    let consumer = ctx.state.session().current();

    let err = ctx
        .state
        .products()
        .add_product(consumer.as_ref(), &draft("Purple Kale"), &CancelToken::never())
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::Forbidden));
    assert!(ctx.state.products().submitted_products().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_fields_reported_together() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx, Role::Farmer).await;
    let farmer = ctx.state.session().current();

    let bad = ProductDraft {
        name: "Ka".to_string(),
        price: "-1".to_string(),
        unit: String::new(),
        description: "Leafy".to_string(),
        image_url: "kale.png".to_string(),
    };
    let err = ctx
        .state
        .products()
        .add_product(farmer.as_ref(), &bad, &CancelToken::never())
        .await
        .unwrap_err();

    let ProductError::Validation(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        ["name", "price", "unit", "description", "image_url"]
    );
    assert_eq!(errors.get("description"), Some("Description must be at least 10 characters"));
}
