use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery, SortDirection,
        UpsertStatus,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::product_image::{NewProductImage as DbNewProductImage, ProductImage as DbProductImage},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductReader, ProductWriter},
};

/// Number of image rows written per insert statement.
const IMAGE_INSERT_BATCH_SIZE: usize = 10;

diesel::define_sql_function! {
    /// SQLite's `RANDOM()`, used to shuffle listings when no sort is requested.
    fn random() -> BigInt;
}

impl ProductReader for DieselRepository {
    fn get_product_by_reference(
        &self,
        reference: &str,
    ) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::reference.eq(reference))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        if let Some(db_product) = product {
            let mut image_map =
                load_images_for_products(&mut conn, &[db_product.reference.clone()])?;
            let images = image_map.remove(&db_product.reference).unwrap_or_default();
            Ok(Some(db_product.into_domain(images)))
        } else {
            Ok(None)
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(brand) = query.brand.as_ref() {
            count_query = count_query.filter(products::brand.eq(brand));
        }

        if let Some(category) = query.category.as_ref() {
            count_query = count_query.filter(products::category.eq(category));
        }

        if let Some(term) = query.search.as_ref() {
            // SQLite LIKE matches ASCII case-insensitively.
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(products::product_name.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(brand) = query.brand.as_ref() {
            items = items.filter(products::brand.eq(brand));
        }

        if let Some(category) = query.category.as_ref() {
            items = items.filter(products::category.eq(category));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(products::product_name.like(pattern));
        }

        // Rows with stock come first; within each tier the order is random
        // unless an explicit price sort was requested.
        items = items.order(products::stock.gt(0).desc());
        items = match query.sort {
            Some(SortDirection::Asc) => items.then_order_by(products::final_price.asc()),
            Some(SortDirection::Desc) => items.then_order_by(products::final_price.desc()),
            None => items.then_order_by(random()),
        };

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let references: Vec<String> = db_products
            .iter()
            .map(|product| product.reference.clone())
            .collect();
        let mut image_map = load_images_for_products(&mut conn, &references)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            let images = image_map.remove(&db_product.reference).unwrap_or_default();
            domain_products.push(db_product.into_domain(images));
        }

        Ok((total, domain_products))
    }

    fn list_brands(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let brands = products::table
            .select(products::brand)
            .distinct()
            .order(products::brand.asc())
            .load::<Option<String>>(&mut conn)?;

        Ok(brands.into_iter().flatten().collect())
    }

    fn list_categories(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let categories = products::table
            .select(products::category)
            .distinct()
            .order(products::category.asc())
            .load::<Option<String>>(&mut conn)?;

        Ok(categories.into_iter().flatten().collect())
    }
}

impl ProductWriter for DieselRepository {
    fn upsert_product(
        &self,
        product: &DomainNewProduct,
    ) -> RepositoryResult<(DomainProduct, UpsertStatus)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<(DomainProduct, UpsertStatus), RepositoryError, _>(|conn| {
            let exists = diesel::select(diesel::dsl::exists(
                products::table.filter(products::reference.eq(&product.reference)),
            ))
            .get_result::<bool>(conn)?;

            let (row, status) = if exists {
                let db_updates = DbUpdateProduct::from(product);
                let updated = diesel::update(
                    products::table.filter(products::reference.eq(&product.reference)),
                )
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;
                (updated, UpsertStatus::Updated)
            } else {
                let db_new = DbNewProduct::from(product);
                let created = diesel::insert_into(products::table)
                    .values(&db_new)
                    .get_result::<DbProduct>(conn)?;
                (created, UpsertStatus::Inserted)
            };

            let mut image_map = load_images_for_products(conn, &[row.reference.clone()])?;
            let images = image_map.remove(&row.reference).unwrap_or_default();

            Ok((row.into_domain(images), status))
        })
    }

    fn replace_product_images(
        &self,
        reference: &str,
        image_paths: &[String],
    ) -> RepositoryResult<()> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(product_images::table.filter(product_images::reference.eq(reference)))
                .execute(conn)?;

            for chunk in image_paths.chunks(IMAGE_INSERT_BATCH_SIZE) {
                let rows: Vec<DbNewProductImage> = chunk
                    .iter()
                    .map(|path| DbNewProductImage {
                        reference,
                        image_path: path.as_str(),
                    })
                    .collect();

                diesel::insert_into(product_images::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            Ok(())
        })
    }

    fn delete_product(&self, reference: &str) -> RepositoryResult<()> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(product_images::table.filter(product_images::reference.eq(reference)))
                .execute(conn)?;

            let deleted =
                diesel::delete(products::table.filter(products::reference.eq(reference)))
                    .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

fn load_images_for_products(
    conn: &mut SqliteConnection,
    references: &[String],
) -> RepositoryResult<HashMap<String, Vec<DbProductImage>>> {
    use crate::schema::product_images;

    if references.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_images::table
        .filter(product_images::reference.eq_any(references))
        .order(product_images::id.asc())
        .load::<DbProductImage>(conn)?;

    let mut map: HashMap<String, Vec<DbProductImage>> = HashMap::new();
    for row in rows {
        map.entry(row.reference.clone()).or_default().push(row);
    }

    Ok(map)
}
