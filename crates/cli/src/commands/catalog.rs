//! Catalog commands.

use rust_decimal::Decimal;

use farmerty_core::Category;
use farmerty_storefront::catalog::{FilterCriteria, PriceRange};
use farmerty_storefront::models::Product;
use farmerty_storefront::state::AppState;

/// Filters given on the command line.
pub struct BrowseArgs {
    pub categories: Vec<Category>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub organic: bool,
    pub query: Option<String>,
}

impl BrowseArgs {
    fn criteria(self) -> FilterCriteria {
        self.categories.into_iter().fold(
            FilterCriteria::new()
                .with_price_range(
                    self.min.unwrap_or(PriceRange::MIN),
                    self.max.unwrap_or(PriceRange::MAX),
                )
                .with_organic_only(self.organic)
                .with_query(self.query.unwrap_or_default()),
            FilterCriteria::with_category,
        )
    }
}

/// Print the catalog narrowed by `args`.
#[allow(clippy::print_stdout)]
pub fn browse(state: &AppState, args: BrowseArgs) {
    let criteria = args.criteria();
    let products = state.catalog().browse(&criteria);

    if criteria.is_active() {
        let chips: Vec<String> = criteria
            .active_chips()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Filters: {}", chips.join(", "));
    }

    if products.is_empty() {
        println!("No products match your filters");
        return;
    }

    println!("Showing {} products", products.len());
    for product in &products {
        println!("{}", product_line(product));
    }
}

/// Print every category with its command-line key.
#[allow(clippy::print_stdout)]
pub fn categories() {
    for category in Category::ALL {
        println!("{:<16} {}", category.key(), category.label());
    }
}

fn product_line(product: &Product) -> String {
    let organic = if product.organic { " [organic]" } else { "" };
    format!(
        "{:<24} {:>7}/{:<6} {:<20} {:<16} {}{organic}",
        product.name,
        product.price.display(),
        product.unit,
        product.farmer,
        product.category,
        product.rating_label(),
    )
}
