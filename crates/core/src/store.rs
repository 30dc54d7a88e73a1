//! Persistence seams for the catalog and the override accounts.
//!
//! Implementations live in `pricebook-db` (PostgreSQL) and
//! [`crate::memory`] (in-process, for development and tests). Keys passed
//! in are already normalized by the caller.

use async_trait::async_trait;

use crate::account::{AccountSummary, NewAccount, SpecialPriceAccount};
use crate::catalog::{NewProduct, Product};
use crate::error::CoreResult;

/// Read access to the product catalog, plus an upsert used for seeding.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All products ordered by display name ascending.
    async fn list_products(&self) -> CoreResult<Vec<Product>>;

    /// Exact match on an uppercase SKU.
    async fn find_product(&self, sku: &str) -> CoreResult<Option<Product>>;

    /// Products whose SKU is in `skus`; unknown SKUs are simply absent.
    async fn find_products(&self, skus: &[String]) -> CoreResult<Vec<Product>>;

    /// Insert or replace a product by SKU.
    async fn upsert_product(&self, product: &NewProduct) -> CoreResult<Product>;
}

/// Storage for special-price accounts, keyed by lowercase email.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// `(email, user)` pairs, most recently created first.
    async fn list_accounts(&self) -> CoreResult<Vec<AccountSummary>>;

    async fn find_account(&self, email: &str) -> CoreResult<Option<SpecialPriceAccount>>;

    /// Insert a new account. Fails with `CoreError::Conflict` when the email
    /// is already taken.
    async fn insert_account(&self, account: &NewAccount) -> CoreResult<SpecialPriceAccount>;

    /// Persist `user`, `products` and `updated_at` of an existing account.
    ///
    /// Returns `None` if no account has that email.
    async fn save_account(
        &self,
        account: &SpecialPriceAccount,
    ) -> CoreResult<Option<SpecialPriceAccount>>;
}
