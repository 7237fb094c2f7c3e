use csv::StringRecord;
use thiserror::Error;

use crate::domain::product::NewProduct;

/// Validation failures raised while normalizing one spreadsheet row.
#[derive(Debug, Error)]
pub enum RowValidationError {
    /// The row has no usable price cell.
    #[error("missing price value")]
    MissingPrice,
    /// The price cell is not an integer.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The price cell is negative.
    #[error("price cannot be negative, got {value}")]
    NegativePrice { value: i64 },
    /// The discount cell is not a number.
    #[error("invalid discount percentage `{value}`")]
    InvalidDiscount { value: String },
    /// The discount cell is outside the allowed percentage range.
    #[error("discount percentage must be between 0 and 100, got {value}")]
    DiscountOutOfRange { value: f64 },
    /// The stock cell is not an integer.
    #[error("invalid stock `{value}`")]
    InvalidStock { value: String },
    /// The stock cell is negative.
    #[error("stock cannot be negative, got {value}")]
    NegativeStock { value: i32 },
}

/// Column indexes resolved from the header row of a catalog file.
#[derive(Debug, Default)]
pub struct CatalogHeaders {
    pub reference: Option<usize>,
    pub brand: Option<usize>,
    pub product_name: Option<usize>,
    pub variant: Option<usize>,
    pub category: Option<usize>,
    pub price: Option<usize>,
    pub discount: Option<usize>,
    pub stock: Option<usize>,
    pub ean_number: Option<usize>,
    pub url: Option<usize>,
    pub description: Option<usize>,
    pub images: Option<usize>,
}

impl CatalogHeaders {
    /// Locate the known columns in the header row, matching labels
    /// case-insensitively.
    pub fn locate(headers: &StringRecord) -> Self {
        Self {
            reference: locate_header(headers, "Reference"),
            brand: locate_header(headers, "Brand"),
            product_name: locate_header(headers, "Product Name"),
            variant: locate_header(headers, "Variant"),
            category: locate_header(headers, "Category"),
            price: locate_header(headers, "Price"),
            discount: locate_header(headers, "Discount (%)"),
            stock: locate_header(headers, "Stock"),
            ean_number: locate_header(headers, "EAN Number"),
            url: locate_header(headers, "URL"),
            description: locate_header(headers, "Description"),
            images: locate_header(headers, "Images"),
        }
    }
}

/// A normalized row ready to be persisted.
#[derive(Debug)]
pub struct RowDraft {
    /// Upsert payload with the final price already derived.
    pub product: NewProduct,
    /// Ordered image paths; `None` when the row had no Images cell.
    pub images: Option<Vec<String>>,
}

/// Result of normalizing one raw spreadsheet row.
#[derive(Debug)]
pub enum NormalizedRow {
    /// The row carries no reference value and is skipped.
    MissingReference,
    /// The row normalized into an upsert draft.
    Draft(RowDraft),
}

/// The trimmed reference cell of a record, when the row carries one.
pub fn reference_cell<'a>(record: &'a StringRecord, headers: &CatalogHeaders) -> Option<&'a str> {
    cell(record, headers.reference)
}

/// Convert one raw record into an upsert draft, or signal that the row has
/// no reference and must be skipped.
pub fn normalize_row(
    record: &StringRecord,
    headers: &CatalogHeaders,
) -> Result<NormalizedRow, RowValidationError> {
    let Some(reference) = reference_cell(record, headers) else {
        return Ok(NormalizedRow::MissingReference);
    };

    let price_raw = cell(record, headers.price).ok_or(RowValidationError::MissingPrice)?;
    let price = price_raw
        .parse::<i64>()
        .map_err(|_| RowValidationError::InvalidPrice {
            value: price_raw.to_string(),
        })?;
    if price < 0 {
        return Err(RowValidationError::NegativePrice { value: price });
    }

    let discount_percentage = match cell(record, headers.discount) {
        Some(raw) => {
            let value = raw
                .parse::<f64>()
                .map_err(|_| RowValidationError::InvalidDiscount {
                    value: raw.to_string(),
                })?;
            if !(0.0..=100.0).contains(&value) {
                return Err(RowValidationError::DiscountOutOfRange { value });
            }
            value
        }
        None => 0.0,
    };

    let stock = match cell(record, headers.stock) {
        Some(raw) => {
            let value = raw
                .parse::<i32>()
                .map_err(|_| RowValidationError::InvalidStock {
                    value: raw.to_string(),
                })?;
            if value < 0 {
                return Err(RowValidationError::NegativeStock { value });
            }
            value
        }
        // An empty stock cell means nothing on hand.
        None => 0,
    };

    let mut product = NewProduct::new(reference, price, discount_percentage).with_stock(stock);

    if let Some(brand) = cell(record, headers.brand) {
        product = product.with_brand(brand);
    }

    if let Some(product_name) = cell(record, headers.product_name) {
        product = product.with_product_name(product_name);
    }

    if let Some(variant) = cell(record, headers.variant) {
        product = product.with_variant(variant);
    }

    if let Some(category) = cell(record, headers.category) {
        product = product.with_category(category);
    }

    if let Some(ean_number) = cell(record, headers.ean_number) {
        product = product.with_ean_number(ean_number);
    }

    if let Some(url) = cell(record, headers.url) {
        product = product.with_url(url);
    }

    if let Some(description) = cell(record, headers.description) {
        product = product.with_description(description);
    }

    // The Images cell is meaningful even when empty: an empty cell clears
    // the stored set, while an absent column leaves it untouched.
    let images = raw_cell(record, headers.images).map(split_image_list);

    Ok(NormalizedRow::Draft(RowDraft { product, images }))
}

/// Split a comma-separated image cell into trimmed paths, preserving the
/// original order.
pub fn split_image_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn cell<'a>(record: &'a StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = record.get(index?)?.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn raw_cell<'a>(record: &'a StringRecord, index: Option<usize>) -> Option<&'a str> {
    record.get(index?)
}
