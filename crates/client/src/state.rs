//! State behind the catalog view: products, accounts and the selected
//! account's special prices.

use pricebook_core::account::{AccountSummary, AccountView};
use pricebook_core::catalog::ProductSummary;

use crate::api::PricebookApi;
use crate::dropdown::DropdownOption;
use crate::toast::Toasts;

pub const PRODUCTS_LOAD_ERROR: &str = "Error loading products";
pub const USERS_LOAD_ERROR: &str = "Error loading users";
pub const SPECIAL_PRICES_LOAD_ERROR: &str = "Error loading special prices";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadingFlags {
    pub products: bool,
    pub users: bool,
    pub special_prices: bool,
}

/// One line of the catalog table.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub stock: i32,
    pub list_price: f64,
    /// The selected account's override, if it has one for this SKU.
    pub special_price: Option<f64>,
}

impl CatalogRow {
    /// Price the selected account actually pays.
    pub fn effective_price(&self) -> f64 {
        self.special_price.unwrap_or(self.list_price)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub products: Vec<ProductSummary>,
    pub users: Vec<AccountSummary>,
    pub selected_user: Option<AccountSummary>,
    pub special_prices: Option<AccountView>,
    pub loading: LoadingFlags,
    pub toasts: Toasts,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the catalog. On failure the previous list is kept.
    pub async fn load_products(&mut self, api: &dyn PricebookApi) {
        self.loading.products = true;
        match api.list_products().await {
            Ok(products) => self.products = products,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load products");
                self.toasts.error(PRODUCTS_LOAD_ERROR);
            }
        }
        self.loading.products = false;
    }

    /// Reload the account list. On failure the previous list is kept.
    pub async fn load_users(&mut self, api: &dyn PricebookApi) {
        self.loading.users = true;
        match api.list_users().await {
            Ok(users) => self.users = users,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users");
                self.toasts.error(USERS_LOAD_ERROR);
            }
        }
        self.loading.users = false;
    }

    /// Select an account (or none) and fetch its resolved special prices.
    ///
    /// Clearing the selection clears the prices; a failed fetch clears them
    /// too and raises an error toast.
    pub async fn select_user(&mut self, api: &dyn PricebookApi, user: Option<AccountSummary>) {
        self.selected_user = user;
        let Some(email) = self.selected_user.as_ref().map(|u| u.email.clone()) else {
            self.special_prices = None;
            return;
        };

        self.loading.special_prices = true;
        match api.get_special_prices(&email).await {
            Ok(view) => self.special_prices = Some(view),
            Err(e) => {
                tracing::warn!(error = %e, email = %email, "Failed to load special prices");
                self.toasts.error(SPECIAL_PRICES_LOAD_ERROR);
                self.special_prices = None;
            }
        }
        self.loading.special_prices = false;
    }

    /// Select by email from the loaded account list; unknown emails clear
    /// the selection.
    pub async fn select_user_by_email(&mut self, api: &dyn PricebookApi, email: Option<&str>) {
        let user = email.and_then(|email| self.users.iter().find(|u| u.email == email).cloned());
        self.select_user(api, user).await;
    }

    /// Override price of `sku` for the selected account.
    pub fn special_price_for(&self, sku: &str) -> Option<f64> {
        self.special_prices
            .as_ref()
            .and_then(|view| view.special_price_for(sku))
    }

    /// Catalog table rows, in catalog order.
    pub fn catalog_rows(&self) -> Vec<CatalogRow> {
        self.products
            .iter()
            .map(|p| CatalogRow {
                sku: p.sku.clone(),
                name: p.name.clone(),
                category: p.category.clone(),
                stock: p.stock,
                list_price: p.price,
                special_price: self.special_price_for(&p.sku),
            })
            .collect()
    }

    /// Account picker entries: user name, with the email as sublabel.
    pub fn user_options(&self) -> Vec<DropdownOption> {
        self.users
            .iter()
            .map(|u| DropdownOption::new(u.email.clone(), u.user.clone()).with_sublabel(u.email.clone()))
            .collect()
    }
}
