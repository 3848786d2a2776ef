//! Product submission commands.

use farmerty_storefront::services::products::{ProductDraft, ProductError};
use farmerty_storefront::state::AppState;

use super::Interrupt;

/// Submit a product as the signed-in farmer.
///
/// Every invalid field is logged before the error is returned.
#[allow(clippy::print_stdout)]
pub async fn add_product(state: &AppState, draft: &ProductDraft) -> Result<(), ProductError> {
    let identity = state.session().current();
    let interrupt = Interrupt::install();

    let outcome = match state
        .products()
        .add_product(identity.as_ref(), draft, interrupt.token())
        .await
    {
        Ok(outcome) => outcome,
        Err(ProductError::Validation(errors)) => {
            for error in errors.errors() {
                tracing::warn!(field = error.field, "{}", error.message);
            }
            return Err(ProductError::Validation(errors));
        }
        Err(e) => return Err(e),
    };

    tracing::info!("{}", outcome.notice);
    println!("{} {}", outcome.value.id, outcome.value.name);
    Ok(())
}

/// Print every farmer-submitted product.
#[allow(clippy::print_stdout)]
pub fn list(state: &AppState) -> Result<(), ProductError> {
    let products = state.products().submitted_products()?;
    if products.is_empty() {
        println!("No products submitted yet");
        return Ok(());
    }

    for product in &products {
        println!(
            "{} {:<24} {:>7}/{:<6} {:<20} {} {}",
            product.id,
            product.name,
            product.price.display(),
            product.unit,
            product.farmer_name,
            product.created_at.format("%Y-%m-%d %H:%M"),
            product.image_url,
        );
    }
    Ok(())
}
