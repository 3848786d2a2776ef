//! Add-Product form input and its validation.

use url::Url;

use farmerty_core::Price;

use crate::models::PLACEHOLDER_IMAGE;
use crate::validation::ValidationErrors;

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Raw Add-Product form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub unit: String,
    pub description: String,
    /// Optional; empty means "use the placeholder image".
    pub image_url: String,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    pub name: String,
    pub price: Price,
    pub unit: String,
    pub description: String,
    pub image_url: String,
}

impl ProductDraft {
    /// Check every field, collecting all failures.
    ///
    /// Text fields are trimmed before their length is checked.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` listing each invalid field in form order.
    pub fn validate(&self) -> Result<ValidProduct, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.chars().count() < MIN_NAME_LENGTH {
            errors.add("name", "Product name must be at least 3 characters");
        }

        let price = Price::parse(&self.price).ok();
        if price.is_none() {
            errors.add("price", "Price must be a positive number");
        }

        let unit = self.unit.trim();
        if unit.is_empty() {
            errors.add("unit", "Unit is required (e.g., kg, bunch, each)");
        }

        let description = self.description.trim();
        if description.chars().count() < MIN_DESCRIPTION_LENGTH {
            errors.add("description", "Description must be at least 10 characters");
        }

        let image_url = self.image_url.trim();
        let image_url = if image_url.is_empty() {
            Some(PLACEHOLDER_IMAGE.to_owned())
        } else {
            Url::parse(image_url).ok().map(String::from)
        };
        if image_url.is_none() {
            errors.add("image_url", "Please enter a valid image URL");
        }

        match (price, image_url) {
            (Some(price), Some(image_url)) if errors.is_empty() => Ok(ValidProduct {
                name: name.to_owned(),
                price,
                unit: unit.to_owned(),
                description: description.to_owned(),
                image_url,
            }),
            _ => Err(errors),
        }
    }
}
