//! Product categories.
//!
//! The category set is fixed. Each category has a human-readable label
//! (what shoppers see and what persisted records carry) and a snake_case key
//! for command-line use.

use serde::{Deserialize, Serialize};

/// Error returned when a category label is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// A product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Vegetables")]
    Vegetables,
    #[serde(rename = "Fruits")]
    Fruits,
    #[serde(rename = "Berries")]
    Berries,
    #[serde(rename = "Dairy & Eggs")]
    DairyAndEggs,
    #[serde(rename = "Meat & Poultry", alias = "Meat")]
    MeatAndPoultry,
    #[serde(rename = "Bakery")]
    Bakery,
    #[serde(rename = "Pantry")]
    Pantry,
    #[serde(rename = "Beverages")]
    Beverages,
    #[serde(rename = "Seafood")]
    Seafood,
    #[serde(rename = "Herbs & Spices")]
    HerbsAndSpices,
}

impl Category {
    /// Every category, in the order the browse sidebar lists them.
    pub const ALL: [Self; 10] = [
        Self::Vegetables,
        Self::Fruits,
        Self::Berries,
        Self::DairyAndEggs,
        Self::MeatAndPoultry,
        Self::Bakery,
        Self::Pantry,
        Self::Beverages,
        Self::Seafood,
        Self::HerbsAndSpices,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Berries => "Berries",
            Self::DairyAndEggs => "Dairy & Eggs",
            Self::MeatAndPoultry => "Meat & Poultry",
            Self::Bakery => "Bakery",
            Self::Pantry => "Pantry",
            Self::Beverages => "Beverages",
            Self::Seafood => "Seafood",
            Self::HerbsAndSpices => "Herbs & Spices",
        }
    }

    /// Snake-case key, e.g. `dairy_and_eggs`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Vegetables => "vegetables",
            Self::Fruits => "fruits",
            Self::Berries => "berries",
            Self::DairyAndEggs => "dairy_and_eggs",
            Self::MeatAndPoultry => "meat_and_poultry",
            Self::Bakery => "bakery",
            Self::Pantry => "pantry",
            Self::Beverages => "beverages",
            Self::Seafood => "seafood",
            Self::HerbsAndSpices => "herbs_and_spices",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    /// Accepts a label (case-insensitive), a snake-case key, or `Meat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.eq_ignore_ascii_case("meat") {
            return Ok(Self::MeatAndPoultry);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(needle) || c.key() == needle)
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}
