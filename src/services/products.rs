use serde::Deserialize;

use crate::domain::product::{Product, ProductListQuery, SortDirection};
use crate::forms::products::ProductForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Sentinel brand filter value meaning "do not filter by brand".
pub const ALL_BRANDS: &str = "All Brands";
/// Sentinel category filter value meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "All Category";

/// Query parameters accepted by the catalog listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Requested page (1-based); defaults to the first page.
    pub page: Option<usize>,
    /// Requested page size; defaults to [`DEFAULT_ITEMS_PER_PAGE`].
    pub per_page: Option<usize>,
    /// Optional exact brand filter; the sentinel value is ignored.
    pub brand: Option<String>,
    /// Optional exact category filter; the sentinel value is ignored.
    pub category: Option<String>,
    /// Optional case-insensitive substring filter on the product name.
    pub search: Option<String>,
    /// Optional price sort; unset yields a random order within each
    /// availability tier.
    pub sort: Option<SortDirection>,
}

/// Lists catalog products for one page, hydrated with their images.
///
/// Products with stock always come before out-of-stock ones; the price sort
/// or the random shuffle only orders rows within those two tiers. A page
/// past the last match yields an empty item list, not an error.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    if page < 1 {
        return Err(ServiceError::InvalidQuery("page must be at least 1"));
    }
    if per_page < 1 {
        return Err(ServiceError::InvalidQuery("page size must be positive"));
    }

    let mut list_query = ProductListQuery::new().paginate(page, per_page);

    if let Some(brand) = query
        .brand
        .filter(|value| !value.is_empty() && value != ALL_BRANDS)
    {
        list_query = list_query.brand(brand);
    }

    if let Some(category) = query
        .category
        .filter(|value| !value.is_empty() && value != ALL_CATEGORIES)
    {
        list_query = list_query.category(category);
    }

    if let Some(term) = query.search.filter(|value| !value.is_empty()) {
        list_query = list_query.search(term);
    }

    if let Some(sort) = query.sort {
        list_query = list_query.sort(sort);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(per_page);

    Ok(Paginated::new(items, page, total, total_pages))
}

/// Fetches one product by its reference, hydrated with its images.
pub fn get_product<R>(repo: &R, reference: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_reference(reference)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates or fully overwrites one product from a validated form.
///
/// When the form carries an image list the stored set is replaced with it;
/// an absent list leaves the stored images untouched.
pub fn upsert_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let payload = form
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let (product, _status) = repo
        .upsert_product(&payload.product)
        .map_err(ServiceError::from)?;

    let Some(paths) = payload.images else {
        return Ok(product);
    };

    repo.replace_product_images(&product.reference, &paths)
        .map_err(ServiceError::from)?;

    // Re-read so the returned record carries the new image set.
    repo.get_product_by_reference(&product.reference)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Deletes one product and its images by reference.
pub fn delete_product<R>(repo: &R, reference: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(reference).map_err(ServiceError::from)
}

/// Distinct brand values present in the catalog.
pub fn list_brands<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: ProductReader + ?Sized,
{
    repo.list_brands().map_err(ServiceError::from)
}

/// Distinct category values present in the catalog.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: ProductReader + ?Sized,
{
    repo.list_categories().map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::product::{NewProduct, Product, UpsertStatus};
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::{MockProductReader, MockProductWriter};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(reference: &str, images: Vec<String>) -> Product {
        Product {
            reference: reference.to_string(),
            brand: Some("Acme".to_string()),
            product_name: Some("Widget".to_string()),
            variant: None,
            category: Some("Tools".to_string()),
            price: 2000,
            discount_percentage: 25.0,
            stock: 3,
            ean_number: None,
            url: None,
            description: None,
            final_price: 1500.0,
            images,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_form(reference: &str, images: Option<Vec<String>>) -> ProductForm {
        ProductForm {
            reference: reference.to_string(),
            brand: "Acme".to_string(),
            product_name: "Widget".to_string(),
            variant: "Blue".to_string(),
            category: "Tools".to_string(),
            price: 2000,
            discount_percentage: 25.0,
            stock: 3,
            ean_number: "4006381333931".to_string(),
            url: "https://example.com/widget".to_string(),
            description: None,
            images,
        }
    }

    #[test]
    fn list_products_rejects_zero_page() {
        let repo = MockProductReader::new();

        let result = list_products(
            &repo,
            ProductsQuery {
                page: Some(0),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(ServiceError::InvalidQuery(_))));
    }

    #[test]
    fn list_products_rejects_zero_page_size() {
        let repo = MockProductReader::new();

        let result = list_products(
            &repo,
            ProductsQuery {
                per_page: Some(0),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(ServiceError::InvalidQuery(_))));
    }

    #[test]
    fn list_products_applies_defaults_and_drops_sentinel_filters() {
        let mut repo = MockProductReader::new();

        repo.expect_list_products()
            .times(1)
            .withf(|query| {
                assert!(query.brand.is_none());
                assert_eq!(query.category.as_deref(), Some("Tools"));
                assert_eq!(query.search.as_deref(), Some("widget"));
                assert!(query.sort.is_none());
                match &query.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 1);
                        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((27, vec![])));

        let query = ProductsQuery {
            brand: Some(ALL_BRANDS.to_string()),
            category: Some("Tools".to_string()),
            search: Some("widget".to_string()),
            ..Default::default()
        };

        let page = list_products(&repo, query).expect("expected success");

        assert_eq!(page.page, 1);
        assert_eq!(page.total_items, 27);
        assert_eq!(page.total_pages, 3);
        assert!(page.items.is_empty());
    }

    #[test]
    fn list_products_passes_sort_through() {
        let mut repo = MockProductReader::new();

        repo.expect_list_products()
            .times(1)
            .withf(|query| {
                assert_eq!(query.sort, Some(SortDirection::Desc));
                true
            })
            .returning(|_| Ok((0, vec![])));

        let query = ProductsQuery {
            sort: Some(SortDirection::Desc),
            ..Default::default()
        };

        let page = list_products(&repo, query).expect("expected success");
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn get_product_maps_missing_to_not_found() {
        let mut repo = MockProductReader::new();

        repo.expect_get_product_by_reference()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_product(&repo, "REF-404");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn upsert_product_without_images_skips_replacement() {
        let mut repo = FakeRepo::new();

        repo.writer
            .expect_upsert_product()
            .times(1)
            .withf(|product: &NewProduct| {
                assert_eq!(product.reference, "REF-1");
                assert_eq!(product.final_price, 1500.0);
                true
            })
            .returning(|_| Ok((sample_product("REF-1", vec![]), UpsertStatus::Inserted)));

        let result = upsert_product(&repo, sample_form("REF-1", None)).expect("expected success");

        assert_eq!(result.reference, "REF-1");
        assert!(result.images.is_empty());
    }

    #[test]
    fn upsert_product_replaces_images_and_rehydrates() {
        let mut repo = FakeRepo::new();

        repo.writer
            .expect_upsert_product()
            .times(1)
            .returning(|_| Ok((sample_product("REF-1", vec![]), UpsertStatus::Updated)));

        repo.writer
            .expect_replace_product_images()
            .times(1)
            .withf(|reference: &str, paths: &[String]| {
                assert_eq!(reference, "REF-1");
                assert_eq!(paths, ["a.jpg".to_string(), "b.jpg".to_string()]);
                true
            })
            .returning(|_, _| Ok(()));

        repo.reader
            .expect_get_product_by_reference()
            .times(1)
            .returning(|_| {
                Ok(Some(sample_product(
                    "REF-1",
                    vec!["a.jpg".to_string(), "b.jpg".to_string()],
                )))
            });

        let form = sample_form("REF-1", Some(vec!["a.jpg".to_string(), "b.jpg".to_string()]));
        let result = upsert_product(&repo, form).expect("expected success");

        assert_eq!(result.images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn upsert_product_rejects_invalid_form() {
        let repo = FakeRepo::new();

        let mut form = sample_form("REF-1", None);
        form.discount_percentage = 150.0;

        let result = upsert_product(&repo, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn delete_product_surfaces_not_found() {
        let mut repo = MockProductWriter::new();

        repo.expect_delete_product()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_product(&repo, "REF-404");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    struct FakeRepo {
        reader: MockProductReader,
        writer: MockProductWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                reader: MockProductReader::new(),
                writer: MockProductWriter::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_reference(&self, reference: &str) -> RepositoryResult<Option<Product>> {
            self.reader.get_product_by_reference(reference)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.reader.list_products(query)
        }

        fn list_brands(&self) -> RepositoryResult<Vec<String>> {
            self.reader.list_brands()
        }

        fn list_categories(&self) -> RepositoryResult<Vec<String>> {
            self.reader.list_categories()
        }
    }

    impl ProductWriter for FakeRepo {
        fn upsert_product(
            &self,
            product: &NewProduct,
        ) -> RepositoryResult<(Product, UpsertStatus)> {
            self.writer.upsert_product(product)
        }

        fn replace_product_images(
            &self,
            reference: &str,
            image_paths: &[String],
        ) -> RepositoryResult<()> {
            self.writer.replace_product_images(reference, image_paths)
        }

        fn delete_product(&self, reference: &str) -> RepositoryResult<()> {
            self.writer.delete_product(reference)
        }
    }
}
