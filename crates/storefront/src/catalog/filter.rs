//! Catalog filtering.
//!
//! A product passes [`FilterCriteria`] when every predicate holds:
//!
//! - its category is selected, or no category is selected
//! - its price lies within the price range (inclusive)
//! - it is organic, when organic-only is set
//! - its name contains the query case-insensitively, when a query is set
//!
//! Filtering is stable and side-effect free, so it is safe to run on every
//! render.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;

use farmerty_core::{Category, Price};

use crate::models::Product;

/// Filter `products` by `criteria`, preserving input order.
#[must_use]
pub fn filter(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

/// Inclusive price bounds within [`PriceRange::MIN`]..=[`PriceRange::MAX`].
///
/// Always satisfies `low <= high`. An upper bound at `MAX` is open-ended,
/// like a "$100+" slider stop, so the full range never hides a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceRange {
    low: Decimal,
    high: Decimal,
}

impl PriceRange {
    /// Lowest selectable bound.
    pub const MIN: Decimal = Decimal::ZERO;
    /// Highest selectable bound.
    pub const MAX: Decimal = Decimal::ONE_HUNDRED;

    /// Build a range, clamping both bounds into `[MIN, MAX]` and swapping
    /// them if they arrive out of order.
    #[must_use]
    pub fn new(low: Decimal, high: Decimal) -> Self {
        let low = low.clamp(Self::MIN, Self::MAX);
        let high = high.clamp(Self::MIN, Self::MAX);
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    /// The unrestricted range.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            low: Self::MIN,
            high: Self::MAX,
        }
    }

    #[must_use]
    pub const fn low(&self) -> Decimal {
        self.low
    }

    #[must_use]
    pub const fn high(&self) -> Decimal {
        self.high
    }

    /// Whether this range excludes nothing.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.low == Self::MIN && self.high == Self::MAX
    }

    /// Whether `price` falls inside the range.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        let amount = price.amount();
        amount >= self.low && (self.high == Self::MAX || amount <= self.high)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} - ${}", self.low.normalize(), self.high.normalize())
    }
}

/// One active filter, as shown in the chip row above the product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChip {
    Category(Category),
    PriceRange(PriceRange),
    OrganicOnly,
    Query(String),
}

impl fmt::Display for FilterChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::PriceRange(range) => write!(f, "{range}"),
            Self::OrganicOnly => f.write_str("Organic Only"),
            Self::Query(query) => write!(f, "\"{query}\""),
        }
    }
}

/// The user's current browse filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    categories: BTreeSet<Category>,
    price_range: PriceRange,
    organic_only: bool,
    query: String,
}

impl FilterCriteria {
    /// Criteria that match everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `category` to the selection.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    /// Restrict prices to `[low, high]` (clamped).
    #[must_use]
    pub fn with_price_range(mut self, low: Decimal, high: Decimal) -> Self {
        self.set_price_range(low, high);
        self
    }

    /// Only show organic products.
    #[must_use]
    pub const fn with_organic_only(mut self, organic_only: bool) -> Self {
        self.organic_only = organic_only;
        self
    }

    /// Match product names against `query`.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Selected categories.
    #[must_use]
    pub const fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }

    #[must_use]
    pub const fn price_range(&self) -> PriceRange {
        self.price_range
    }

    #[must_use]
    pub const fn organic_only(&self) -> bool {
        self.organic_only
    }

    /// Raw query text as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Select `category` if it is not selected, otherwise deselect it.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// Replace the price range (clamped, reordered if needed).
    pub fn set_price_range(&mut self, low: Decimal, high: Decimal) {
        self.price_range = PriceRange::new(low, high);
    }

    pub const fn set_organic_only(&mut self, organic_only: bool) {
        self.organic_only = organic_only;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Reset categories, price range and the organic flag.
    ///
    /// The search query is kept; it has its own clear control.
    pub fn clear(&mut self) {
        self.categories.clear();
        self.price_range = PriceRange::full();
        self.organic_only = false;
    }

    /// Undo the filter a chip represents.
    pub fn remove_chip(&mut self, chip: &FilterChip) {
        match chip {
            FilterChip::Category(category) => {
                self.categories.remove(category);
            }
            FilterChip::PriceRange(_) => self.price_range = PriceRange::full(),
            FilterChip::OrganicOnly => self.organic_only = false,
            FilterChip::Query(_) => self.query.clear(),
        }
    }

    fn normalized_query(&self) -> Option<String> {
        let query = self.query.trim();
        (!query.is_empty()).then(|| query.to_lowercase())
    }

    /// Whether any predicate narrows the catalog.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty()
            || !self.price_range.is_full()
            || self.organic_only
            || self.normalized_query().is_some()
    }

    /// Active filters in display order: categories, price, organic, query.
    #[must_use]
    pub fn active_chips(&self) -> Vec<FilterChip> {
        let mut chips: Vec<FilterChip> = self
            .categories
            .iter()
            .copied()
            .map(FilterChip::Category)
            .collect();

        if !self.price_range.is_full() {
            chips.push(FilterChip::PriceRange(self.price_range));
        }
        if self.organic_only {
            chips.push(FilterChip::OrganicOnly);
        }
        if self.normalized_query().is_some() {
            chips.push(FilterChip::Query(self.query.trim().to_owned()));
        }

        chips
    }

    /// Whether `product` passes every predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }
        if !self.price_range.contains(product.price) {
            return false;
        }
        if self.organic_only && !product.organic {
            return false;
        }
        self.normalized_query()
            .is_none_or(|query| product.name.to_lowercase().contains(&query))
    }
}
