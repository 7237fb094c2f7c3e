use mockall::mock;

use super::{ProductReader, ProductWriter};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpsertStatus};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_reference(&self, reference: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_brands(&self) -> RepositoryResult<Vec<String>>;
        fn list_categories(&self) -> RepositoryResult<Vec<String>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn upsert_product(&self, product: &NewProduct) -> RepositoryResult<(Product, UpsertStatus)>;
        fn replace_product_images(&self, reference: &str, image_paths: &[String]) -> RepositoryResult<()>;
        fn delete_product(&self, reference: &str) -> RepositoryResult<()>;
    }
}
