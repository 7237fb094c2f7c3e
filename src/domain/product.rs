use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Derive the discounted price from the list price and a percentage discount.
///
/// The result is stored alongside the product and never recomputed at read
/// time, so every write path that changes `price` or `discount_percentage`
/// must call this again.
pub fn final_price(price: i64, discount_percentage: f64) -> f64 {
    price as f64 - price as f64 * discount_percentage / 100.0
}

/// Domain representation of a catalog product, hydrated with its images.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Caller-supplied business key; immutable once created.
    pub reference: String,
    /// Optional brand label.
    pub brand: Option<String>,
    /// Optional display name of the product.
    pub product_name: Option<String>,
    /// Optional variant label (size, colour and the like).
    pub variant: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// List price before any discount.
    pub price: i64,
    /// Discount applied to the list price, in percent (0 to 100).
    pub discount_percentage: f64,
    /// Units currently in stock.
    pub stock: i32,
    /// Optional EAN barcode value.
    pub ean_number: Option<String>,
    /// Optional external product page URL.
    pub url: Option<String>,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Discounted price derived from `price` and `discount_percentage`.
    pub final_price: f64,
    /// Ordered image paths attached to the product.
    pub images: Vec<String>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last overwrite of the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload persisted by an upsert; created or full-field overwrite.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Business key the upsert is keyed on.
    pub reference: String,
    /// Optional brand label.
    pub brand: Option<String>,
    /// Optional display name of the product.
    pub product_name: Option<String>,
    /// Optional variant label.
    pub variant: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// List price before any discount.
    pub price: i64,
    /// Discount applied to the list price, in percent.
    pub discount_percentage: f64,
    /// Units currently in stock.
    pub stock: i32,
    /// Optional EAN barcode value.
    pub ean_number: Option<String>,
    /// Optional external product page URL.
    pub url: Option<String>,
    /// Optional longer description.
    pub description: Option<String>,
    /// Discounted price derived when the payload is built.
    pub final_price: f64,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build an upsert payload, deriving `final_price` from the supplied
    /// price and discount.
    pub fn new(reference: impl Into<String>, price: i64, discount_percentage: f64) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            reference: reference.into(),
            brand: None,
            product_name: None,
            variant: None,
            category: None,
            price,
            discount_percentage,
            stock: 0,
            ean_number: None,
            url: None,
            description: None,
            final_price: final_price(price, discount_percentage),
            updated_at: now,
        }
    }

    /// Attach a brand label to the payload.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Attach a display name to the payload.
    pub fn with_product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    /// Attach a variant label to the payload.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Attach a category label to the payload.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the stock level, which otherwise defaults to zero.
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// Attach an EAN barcode value to the payload.
    pub fn with_ean_number(mut self, ean_number: impl Into<String>) -> Self {
        self.ean_number = Some(ean_number.into());
        self
    }

    /// Attach an external product page URL to the payload.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach a descriptive text to the payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Whether an upsert created a new product row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStatus {
    Inserted,
    Updated,
}

/// Direction of the price sort within each availability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional exact brand filter.
    pub brand: Option<String>,
    /// Optional exact category filter.
    pub category: Option<String>,
    /// Optional substring search applied to the product name.
    pub search: Option<String>,
    /// Optional price sort; unset means a random order within each tier.
    pub sort: Option<SortDirection>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query matching the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by an exact brand match.
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Filter the results by an exact category match.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter the results by a substring match on the product name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Sort each availability tier by final price instead of randomly.
    pub fn sort(mut self, direction: SortDirection) -> Self {
        self.sort = Some(direction);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
