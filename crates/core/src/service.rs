//! Special-price resolution service.
//!
//! Validates override lists against the catalog, creates and updates
//! accounts, and projects accounts into catalog-joined views. The service is
//! the only writer of accounts; handlers never touch the stores directly.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;

use crate::account::{
    AccountSummary, AccountView, NewAccount, OverrideEntry, SpecialPriceAccount,
};
use crate::catalog::{Product, ProductSnapshot, ProductSummary};
use crate::error::{CoreError, CoreResult};
use crate::keys::{normalize_sku, parse_email_key};
use crate::pricing::{
    apply_changes, distinct_skus, missing_skus, missing_skus_message, resolve_overrides,
    AccountChanges,
};
use crate::requests::{CreateSpecialPrice, UpdateSpecialPrice};
use crate::store::{AccountStore, CatalogStore};

/// Entity labels used in not-found errors.
pub const PRODUCT_ENTITY: &str = "Product";
pub const ACCOUNT_ENTITY: &str = "User";

#[derive(Clone)]
pub struct ResolutionService {
    catalog: Arc<dyn CatalogStore>,
    accounts: Arc<dyn AccountStore>,
}

impl ResolutionService {
    pub fn new(catalog: Arc<dyn CatalogStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { catalog, accounts }
    }

    /// Every product, by display name, in its display-safe projection.
    pub async fn list_catalog(&self) -> CoreResult<Vec<ProductSummary>> {
        let products = self.catalog.list_products().await?;
        Ok(products.iter().map(ProductSummary::from).collect())
    }

    pub async fn get_product_by_sku(&self, sku: &str) -> CoreResult<Product> {
        let sku = normalize_sku(sku);
        self.catalog
            .find_product(&sku)
            .await?
            .ok_or(CoreError::NotFound {
                entity: PRODUCT_ENTITY,
                key: sku,
            })
    }

    /// `(email, user)` of every account, newest first.
    pub async fn list_accounts(&self) -> CoreResult<Vec<AccountSummary>> {
        self.accounts.list_accounts().await
    }

    /// Account with each override joined to its current catalog entry.
    ///
    /// Overrides whose SKU left the catalog resolve to a `null` product.
    pub async fn get_account_view(&self, email: &str) -> CoreResult<AccountView> {
        let account = self.require_account(email).await?;

        let skus = distinct_skus(&account.products);
        let snapshots: HashMap<String, ProductSnapshot> = self
            .catalog
            .find_products(&skus)
            .await?
            .iter()
            .map(|p| (p.sku.clone(), ProductSnapshot::from(p)))
            .collect();

        Ok(AccountView {
            products: resolve_overrides(&account.products, &snapshots),
            id: account.id,
            email: account.email,
            user: account.user,
            created_at: account.created_at,
            updated_at: account.updated_at,
        })
    }

    /// Create an account after checking every override SKU exists.
    ///
    /// Nothing is written when any SKU is unknown.
    pub async fn create_account(&self, input: &CreateSpecialPrice) -> CoreResult<SpecialPriceAccount> {
        let input = input.validated()?;
        let entries = input.entries();
        self.ensure_skus_exist(&entries).await?;

        let now = Utc::now();
        let account = self
            .accounts
            .insert_account(&NewAccount {
                email: input.email,
                user: input.user,
                products: entries,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(
            email = %account.email,
            overrides = account.products.len(),
            "Special price account created",
        );
        Ok(account)
    }

    /// Replace the user name and/or the whole override list of an account.
    ///
    /// An absent or empty `products` leaves the current list untouched;
    /// `updatedAt` is bumped on every successful call.
    pub async fn update_account(
        &self,
        email: &str,
        input: &UpdateSpecialPrice,
    ) -> CoreResult<SpecialPriceAccount> {
        let input = input.validated()?;
        let existing = self.require_account(email).await?;

        let products = input.entries();
        if let Some(entries) = &products {
            self.ensure_skus_exist(entries).await?;
        }

        let replaced = products.is_some();
        let updated = apply_changes(
            existing,
            AccountChanges {
                user: input.user,
                products,
            },
            Utc::now(),
        );

        let saved = self
            .accounts
            .save_account(&updated)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: ACCOUNT_ENTITY,
                key: updated.email.clone(),
            })?;

        tracing::info!(
            email = %saved.email,
            overrides_replaced = replaced,
            overrides = saved.products.len(),
            "Special price account updated",
        );
        Ok(saved)
    }

    async fn require_account(&self, email: &str) -> CoreResult<SpecialPriceAccount> {
        let email = parse_email_key(email)?;
        self.accounts
            .find_account(&email)
            .await?
            .ok_or(CoreError::NotFound {
                entity: ACCOUNT_ENTITY,
                key: email,
            })
    }

    async fn ensure_skus_exist(&self, entries: &[OverrideEntry]) -> CoreResult<()> {
        let skus = distinct_skus(entries);
        let known: HashSet<String> = self
            .catalog
            .find_products(&skus)
            .await?
            .into_iter()
            .map(|p| p.sku)
            .collect();

        let missing = missing_skus(entries, &known);
        if missing.is_empty() {
            return Ok(());
        }

        tracing::debug!(missing = ?missing, "Rejected override list with unknown SKUs");
        Err(CoreError::Validation(missing_skus_message(&missing)))
    }
}
