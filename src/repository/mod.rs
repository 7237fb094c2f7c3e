use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpsertStatus};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod product;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the product catalog.
pub trait ProductReader {
    /// Fetch a single product by its business key, hydrated with images.
    fn get_product_by_reference(&self, reference: &str) -> RepositoryResult<Option<Product>>;
    /// List products matching the query together with the total match count.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Distinct non-null brand values across the catalog.
    fn list_brands(&self) -> RepositoryResult<Vec<String>>;
    /// Distinct non-null category values across the catalog.
    fn list_categories(&self) -> RepositoryResult<Vec<String>>;
}

/// Write operations over the product catalog.
pub trait ProductWriter {
    /// Insert the product if its reference is new, otherwise overwrite every
    /// field of the existing row.
    fn upsert_product(&self, product: &NewProduct) -> RepositoryResult<(Product, UpsertStatus)>;
    /// Drop the product's current image set and persist `image_paths` in
    /// their given order.
    fn replace_product_images(
        &self,
        reference: &str,
        image_paths: &[String],
    ) -> RepositoryResult<()>;
    /// Remove the product's images and then the product itself.
    fn delete_product(&self, reference: &str) -> RepositoryResult<()>;
}
