use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;

/// Maximum allowed length for a product reference.
const REFERENCE_MAX_LEN: usize = 64;
const REFERENCE_MAX_LEN_VALIDATOR: u64 = REFERENCE_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required field is empty after sanitization.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
}

/// Payload accepted for a single-product create or full overwrite.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    /// Business key of the product.
    #[validate(length(min = 1, max = REFERENCE_MAX_LEN_VALIDATOR))]
    pub reference: String,
    /// Brand label.
    #[validate(length(min = 1))]
    pub brand: String,
    /// Display name of the product.
    #[validate(length(min = 1))]
    pub product_name: String,
    /// Variant label.
    #[validate(length(min = 1))]
    pub variant: String,
    /// Category label.
    #[validate(length(min = 1))]
    pub category: String,
    /// List price before any discount.
    #[validate(range(min = 0))]
    pub price: i64,
    /// Discount percentage between 0 and 100.
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_percentage: f64,
    /// Units in stock.
    #[validate(range(min = 0))]
    pub stock: i32,
    /// EAN barcode value.
    #[validate(length(min = 1))]
    pub ean_number: String,
    /// External product page URL.
    #[validate(url)]
    pub url: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Ordered image paths; `None` leaves the stored images untouched.
    pub images: Option<Vec<String>>,
}

/// Sanitized single-product payload ready for persistence.
#[derive(Debug)]
pub struct ProductPayload {
    /// Upsert payload with the final price already derived.
    pub product: NewProduct,
    /// Ordered image paths; `None` leaves the stored images untouched.
    pub images: Option<Vec<String>>,
}

impl ProductForm {
    /// Validates and sanitizes the form into an upsert-ready payload.
    pub fn into_payload(self) -> ProductFormResult<ProductPayload> {
        self.validate()?;

        let reference = require_field(&self.reference, "reference")?;
        let brand = require_field(&self.brand, "brand")?;
        let product_name = require_field(&self.product_name, "product name")?;
        let variant = require_field(&self.variant, "variant")?;
        let category = require_field(&self.category, "category")?;
        let ean_number = require_field(&self.ean_number, "EAN number")?;
        let url = require_field(&self.url, "URL")?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let mut product = NewProduct::new(reference, self.price, self.discount_percentage)
            .with_brand(brand)
            .with_product_name(product_name)
            .with_variant(variant)
            .with_category(category)
            .with_stock(self.stock)
            .with_ean_number(ean_number)
            .with_url(url);

        if let Some(description) = description {
            product = product.with_description(description);
        }

        let images = self.images.map(|paths| {
            paths
                .iter()
                .map(|path| path.trim().to_string())
                .filter(|path| !path.is_empty())
                .collect()
        });

        Ok(ProductPayload { product, images })
    }
}

fn require_field(input: &str, field: &'static str) -> ProductFormResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ProductFormError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
