use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::{AccountSummary, NewAccount, SpecialPriceAccount};
use crate::catalog::{NewProduct, Product};
use crate::error::{CoreError, CoreResult};
use crate::store::{AccountStore, CatalogStore};
use crate::types::DbId;

#[derive(Debug, Default)]
struct Tables {
    products: HashMap<String, Product>,
    accounts: HashMap<String, SpecialPriceAccount>,
    next_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory catalog and account store.
///
/// Intended for tests/dev. Uniqueness of SKU and email is enforced the same
/// way the database constraints enforce it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `products`.
    pub fn with_products(products: impl IntoIterator<Item = NewProduct>) -> CoreResult<Self> {
        let store = Self::new();
        {
            let mut tables = store.write()?;
            for p in products {
                upsert(&mut tables, &p);
            }
        }
        Ok(store)
    }

    /// Drop a product from the catalog, leaving override references dangling.
    pub fn remove_product(&self, sku: &str) -> CoreResult<bool> {
        Ok(self.write()?.products.remove(sku).is_some())
    }

    fn read(&self) -> CoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| CoreError::Internal("store lock poisoned".to_string()))
    }

    fn write(&self) -> CoreResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| CoreError::Internal("store lock poisoned".to_string()))
    }
}

fn upsert(tables: &mut Tables, product: &NewProduct) -> Product {
    let p = product.normalized();
    let now = Utc::now();
    let (id, created_at) = match tables.products.get(&p.sku) {
        Some(existing) => (existing.id, existing.created_at),
        None => (tables.next_id(), now),
    };

    let stored = Product {
        id,
        sku: p.sku.clone(),
        name: p.name,
        description: p.description,
        price: p.price,
        base_price: p.base_price,
        category: p.category,
        stock: p.stock,
        image: p.image,
        brand: p.brand,
        rating: p.rating,
        created_at,
        updated_at: now,
    };
    tables.products.insert(p.sku, stored.clone());
    stored
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.read()?.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.sku.cmp(&b.sku)));
        Ok(products)
    }

    async fn find_product(&self, sku: &str) -> CoreResult<Option<Product>> {
        Ok(self.read()?.products.get(sku).cloned())
    }

    async fn find_products(&self, skus: &[String]) -> CoreResult<Vec<Product>> {
        let tables = self.read()?;
        let mut seen = HashSet::new();
        Ok(skus
            .iter()
            .filter(|sku| seen.insert(sku.as_str()))
            .filter_map(|sku| tables.products.get(sku).cloned())
            .collect())
    }

    async fn upsert_product(&self, product: &NewProduct) -> CoreResult<Product> {
        Ok(upsert(&mut *self.write()?, product))
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn list_accounts(&self) -> CoreResult<Vec<AccountSummary>> {
        let tables = self.read()?;
        let mut accounts: Vec<&SpecialPriceAccount> = tables.accounts.values().collect();
        accounts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(accounts.into_iter().map(AccountSummary::from).collect())
    }

    async fn find_account(&self, email: &str) -> CoreResult<Option<SpecialPriceAccount>> {
        Ok(self.read()?.accounts.get(email).cloned())
    }

    async fn insert_account(&self, account: &NewAccount) -> CoreResult<SpecialPriceAccount> {
        let mut tables = self.write()?;
        if tables.accounts.contains_key(&account.email) {
            return Err(CoreError::Conflict(
                "Duplicate resource: email already exists".to_string(),
            ));
        }

        let stored = SpecialPriceAccount {
            id: tables.next_id(),
            email: account.email.clone(),
            user: account.user.clone(),
            products: account.products.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        };
        tables.accounts.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn save_account(
        &self,
        account: &SpecialPriceAccount,
    ) -> CoreResult<Option<SpecialPriceAccount>> {
        let mut tables = self.write()?;
        let Some(existing) = tables.accounts.get_mut(&account.email) else {
            return Ok(None);
        };

        existing.user = account.user.clone();
        existing.products = account.products.clone();
        existing.updated_at = account.updated_at;
        Ok(Some(existing.clone()))
    }
}
