//! Product types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farmerty_core::{Category, Price, ProductId, UserId};

/// Image reference stored when a farmer submits a product without one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    pub id: ProductId,
    /// Product name shown on the card.
    pub name: String,
    /// Display name of the selling farm.
    pub farmer: String,
    /// Id of the selling farmer.
    pub farmer_id: UserId,
    /// Price per unit.
    pub price: Price,
    /// Unit label (e.g. "lb", "dozen").
    pub unit: String,
    /// Image URL.
    pub image: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    /// Category.
    pub category: Category,
    /// Certified organic.
    pub organic: bool,
}

impl Product {
    /// Rating formatted with one decimal place, as shown next to the stars.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

/// A product added by a farmer through the Add-Product flow.
///
/// Submitted products live in their own list and are never merged into the
/// seed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub unit: String,
    pub description: String,
    /// Image URL, or [`PLACEHOLDER_IMAGE`].
    pub image_url: String,
    pub farmer_id: UserId,
    pub farmer_name: String,
    pub created_at: DateTime<Utc>,
}

impl SubmittedProduct {
    /// Whether the farmer supplied no image.
    #[must_use]
    pub fn has_placeholder_image(&self) -> bool {
        self.image_url == PLACEHOLDER_IMAGE
    }
}
