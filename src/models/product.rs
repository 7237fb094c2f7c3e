use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::models::product_image::ProductImage;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(primary_key(reference))]
pub struct Product {
    pub reference: String,
    pub brand: Option<String>,
    pub product_name: Option<String>,
    pub variant: Option<String>,
    pub category: Option<String>,
    pub price: i64,
    pub discount_percentage: f64,
    pub stock: i32,
    pub ean_number: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub final_price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub reference: &'a str,
    pub brand: Option<&'a str>,
    pub product_name: Option<&'a str>,
    pub variant: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: i64,
    pub discount_percentage: f64,
    pub stock: i32,
    pub ean_number: Option<&'a str>,
    pub url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub final_price: f64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub brand: Option<&'a str>,
    pub product_name: Option<&'a str>,
    pub variant: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: i64,
    pub discount_percentage: f64,
    pub stock: i32,
    pub ean_number: Option<&'a str>,
    pub url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub final_price: f64,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn into_domain(self, images: Vec<ProductImage>) -> DomainProduct {
        DomainProduct {
            reference: self.reference,
            brand: self.brand,
            product_name: self.product_name,
            variant: self.variant,
            category: self.category,
            price: self.price,
            discount_percentage: self.discount_percentage,
            stock: self.stock,
            ean_number: self.ean_number,
            url: self.url,
            description: self.description,
            final_price: self.final_price,
            images: images.into_iter().map(|image| image.image_path).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<(Product, Vec<ProductImage>)> for DomainProduct {
    fn from(value: (Product, Vec<ProductImage>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            reference: value.reference.as_str(),
            brand: value.brand.as_deref(),
            product_name: value.product_name.as_deref(),
            variant: value.variant.as_deref(),
            category: value.category.as_deref(),
            price: value.price,
            discount_percentage: value.discount_percentage,
            stock: value.stock,
            ean_number: value.ean_number.as_deref(),
            url: value.url.as_deref(),
            description: value.description.as_deref(),
            final_price: value.final_price,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            brand: value.brand.as_deref(),
            product_name: value.product_name.as_deref(),
            variant: value.variant.as_deref(),
            category: value.category.as_deref(),
            price: value.price,
            discount_percentage: value.discount_percentage,
            stock: value.stock,
            ean_number: value.ean_number.as_deref(),
            url: value.url.as_deref(),
            description: value.description.as_deref(),
            final_price: value.final_price,
            updated_at: value.updated_at,
        }
    }
}
