use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::models::product::Product;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_images)]
#[diesel(belongs_to(Product, foreign_key = reference))]
pub struct ProductImage {
    pub id: i32,
    pub reference: String,
    pub image_path: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub reference: &'a str,
    pub image_path: &'a str,
}
