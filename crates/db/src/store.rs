//! PostgreSQL implementations of the core store traits.

use async_trait::async_trait;
use pricebook_core::account::{AccountSummary, NewAccount, SpecialPriceAccount};
use pricebook_core::catalog::{NewProduct, Product};
use pricebook_core::error::CoreResult;
use pricebook_core::store::{AccountStore, CatalogStore};

use crate::error::classify;
use crate::repositories::{ProductRepo, SpecialPriceRepo};
use crate::DbPool;

/// Catalog reads backed by the `products` table.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        let rows = ProductRepo::list_all(&self.pool).await.map_err(classify)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_product(&self, sku: &str) -> CoreResult<Option<Product>> {
        let row = ProductRepo::find_by_sku(&self.pool, sku)
            .await
            .map_err(classify)?;
        Ok(row.map(Product::from))
    }

    async fn find_products(&self, skus: &[String]) -> CoreResult<Vec<Product>> {
        let rows = ProductRepo::find_by_skus(&self.pool, skus)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn upsert_product(&self, product: &NewProduct) -> CoreResult<Product> {
        let row = ProductRepo::upsert(&self.pool, &product.normalized())
            .await
            .map_err(classify)?;
        Ok(row.into())
    }
}

/// Special-price accounts backed by the `special_price_accounts` table.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn list_accounts(&self) -> CoreResult<Vec<AccountSummary>> {
        let rows = SpecialPriceRepo::list_summaries(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(AccountSummary::from).collect())
    }

    async fn find_account(&self, email: &str) -> CoreResult<Option<SpecialPriceAccount>> {
        let row = SpecialPriceRepo::find_by_email(&self.pool, email)
            .await
            .map_err(classify)?;
        Ok(row.map(SpecialPriceAccount::from))
    }

    async fn insert_account(&self, account: &NewAccount) -> CoreResult<SpecialPriceAccount> {
        let row = SpecialPriceRepo::create(&self.pool, account)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn save_account(
        &self,
        account: &SpecialPriceAccount,
    ) -> CoreResult<Option<SpecialPriceAccount>> {
        let row = SpecialPriceRepo::save(&self.pool, account)
            .await
            .map_err(classify)?;
        Ok(row.map(SpecialPriceAccount::from))
    }
}
