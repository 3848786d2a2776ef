//! Product catalog and browsing.
//!
//! The catalog is a fixed seed list. Browsing narrows it with
//! [`FilterCriteria`]; nothing here mutates the catalog.

mod filter;

pub use filter::{FilterChip, FilterCriteria, PriceRange, filter};

use farmerty_core::{Category, Price, PriceError, ProductId, UserId};

use crate::models::Product;

/// The browsable product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The seeded marketplace catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products matching `criteria`, in catalog order.
    #[must_use]
    pub fn browse(&self, criteria: &FilterCriteria) -> Vec<Product> {
        filter(&self.products, criteria)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

/// One row of the launch catalog.
struct Seed {
    id: &'static str,
    name: &'static str,
    farmer: &'static str,
    farmer_id: &'static str,
    cents: i64,
    unit: &'static str,
    photo: &'static str,
    rating: f32,
    category: Category,
    organic: bool,
}

impl Seed {
    fn product(&self) -> Result<Product, PriceError> {
        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name.to_owned(),
            farmer: self.farmer.to_owned(),
            farmer_id: UserId::new(self.farmer_id),
            price: Price::from_cents(self.cents)?,
            unit: self.unit.to_owned(),
            image: format!(
                "https://images.unsplash.com/photo-{}?auto=format&fit=crop&q=80&w=400&h=400",
                self.photo
            ),
            rating: self.rating,
            category: self.category,
            organic: self.organic,
        })
    }
}

const SEEDS: [Seed; 8] = [
    Seed {
        id: "1",
        name: "Fresh Organic Strawberries",
        farmer: "Green Valley Farm",
        farmer_id: "f1",
        cents: 599,
        unit: "basket",
        photo: "1518635017498-87f514b751ba",
        rating: 4.8,
        category: Category::Berries,
        organic: true,
    },
    Seed {
        id: "2",
        name: "Heirloom Tomatoes",
        farmer: "Sunshine Organics",
        farmer_id: "f2",
        cents: 349,
        unit: "lb",
        photo: "1546094096-0df4bcaaa337",
        rating: 4.5,
        category: Category::Vegetables,
        organic: true,
    },
    Seed {
        id: "3",
        name: "Free-Range Eggs",
        farmer: "Happy Hens Farm",
        farmer_id: "f3",
        cents: 499,
        unit: "dozen",
        photo: "1498654077810-12c21d4d6dc3",
        rating: 4.9,
        category: Category::DairyAndEggs,
        organic: true,
    },
    Seed {
        id: "4",
        name: "Rustic Sourdough Bread",
        farmer: "Artisan Bakery",
        farmer_id: "f4",
        cents: 650,
        unit: "loaf",
        photo: "1584997691073-91e2a8e0a9ef",
        rating: 4.7,
        category: Category::Bakery,
        organic: false,
    },
    Seed {
        id: "5",
        name: "Local Honey",
        farmer: "Busy Bee Apiaries",
        farmer_id: "f5",
        cents: 899,
        unit: "jar",
        photo: "1587049352851-8d4e89133924",
        rating: 4.8,
        category: Category::Pantry,
        organic: true,
    },
    Seed {
        id: "6",
        name: "Fresh Spinach",
        farmer: "Greens & More",
        farmer_id: "f6",
        cents: 299,
        unit: "bunch",
        photo: "1576045057995-568f588f82fb",
        rating: 4.3,
        category: Category::Vegetables,
        organic: true,
    },
    Seed {
        id: "7",
        name: "Grass-Fed Ground Beef",
        farmer: "Highland Pastures",
        farmer_id: "f7",
        cents: 799,
        unit: "lb",
        photo: "1607623814075-e51df1bdc82f",
        rating: 4.6,
        category: Category::MeatAndPoultry,
        organic: false,
    },
    Seed {
        id: "8",
        name: "Freshly Roasted Coffee Beans",
        farmer: "Mountain Roasters",
        farmer_id: "f8",
        cents: 1299,
        unit: "bag",
        photo: "1559056211-185c446ff3d1",
        rating: 4.9,
        category: Category::Beverages,
        organic: true,
    },
];

/// The eight products the marketplace launches with.
/// A row whose price fails validation is logged and skipped.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    SEEDS
        .iter()
        .filter_map(|seed| match seed.product() {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::error!(id = seed.id, error = %e, "Invalid seed product");
                None
            }
        })
        .collect()
}
