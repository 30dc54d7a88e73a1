//! Row struct for the `products` table.

use pricebook_core::catalog::Product;
use pricebook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub base_price: f64,
    pub category: Option<String>,
    pub stock: i32,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            sku: row.sku,
            name: row.name,
            description: row.description,
            price: row.price,
            base_price: row.base_price,
            category: row.category,
            stock: row.stock,
            image: row.image,
            brand: row.brand,
            rating: row.rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
