//! Repository for the `products` table.

use pricebook_core::catalog::NewProduct;
use sqlx::PgPool;

use crate::models::product::ProductRow;

/// Column list for the `products` table.
const COLUMNS: &str = "id, sku, name, description, price, base_price, category, \
    stock, image, brand, rating, created_at, updated_at";

/// Catalog order: byte-wise by name (`COLLATE "C"`, independent of the
/// database locale), then by SKU.
const LIST_ORDER: &str = r#"name COLLATE "C" ASC, sku ASC"#;

/// Read access to the catalog plus an upsert used for seeding.
pub struct ProductRepo;

impl ProductRepo {
    /// All products ordered by display name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY {LIST_ORDER}");
        sqlx::query_as::<_, ProductRow>(&query).fetch_all(pool).await
    }

    /// Find a product by its exact (uppercase) SKU.
    pub async fn find_by_sku(pool: &PgPool, sku: &str) -> Result<Option<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE sku = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(sku)
            .fetch_optional(pool)
            .await
    }

    /// Every product whose SKU appears in `skus`. Unknown SKUs are skipped.
    pub async fn find_by_skus(pool: &PgPool, skus: &[String]) -> Result<Vec<ProductRow>, sqlx::Error> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM products WHERE sku = ANY($1)");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(skus)
            .fetch_all(pool)
            .await
    }

    /// Insert a product, or replace every attribute of the existing row with
    /// the same SKU. `input` is expected to be normalized already.
    pub async fn upsert(pool: &PgPool, input: &NewProduct) -> Result<ProductRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (sku, name, description, price, base_price, category, stock, image, brand, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (sku) DO UPDATE SET \
                name = EXCLUDED.name, \
                description = EXCLUDED.description, \
                price = EXCLUDED.price, \
                base_price = EXCLUDED.base_price, \
                category = EXCLUDED.category, \
                stock = EXCLUDED.stock, \
                image = EXCLUDED.image, \
                brand = EXCLUDED.brand, \
                rating = EXCLUDED.rating, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.base_price)
            .bind(&input.category)
            .bind(input.stock)
            .bind(&input.image)
            .bind(&input.brand)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_ignores_database_locale() {
        assert!(LIST_ORDER.starts_with(r#"name COLLATE "C" ASC"#));
        assert!(LIST_ORDER.ends_with("sku ASC"));
    }
}
