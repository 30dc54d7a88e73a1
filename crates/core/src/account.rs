//! Special-price account types.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductSnapshot;
use crate::types::{DbId, Timestamp};

/// One (SKU, override price) pair on an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideEntry {
    pub sku: String,
    pub special_price: f64,
}

/// A persisted special-price account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialPriceAccount {
    pub id: DbId,
    pub email: String,
    pub user: String,
    pub products: Vec<OverrideEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a new account; both timestamps are set by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub email: String,
    pub user: String,
    pub products: Vec<OverrideEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// `(email, user)` projection used by the account picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub email: String,
    pub user: String,
}

impl From<&SpecialPriceAccount> for AccountSummary {
    fn from(a: &SpecialPriceAccount) -> Self {
        Self {
            email: a.email.clone(),
            user: a.user.clone(),
        }
    }
}

/// An override entry joined against the live catalog.
///
/// `product` is `None` (serialized as `null`) when the SKU no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOverride {
    pub sku: String,
    pub special_price: f64,
    pub product: Option<ProductSnapshot>,
}

/// An account with its override list expanded against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: DbId,
    pub email: String,
    pub user: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub products: Vec<ResolvedOverride>,
}

impl AccountView {
    /// Override price for `sku` on this account, if any.
    pub fn special_price_for(&self, sku: &str) -> Option<f64> {
        self.products
            .iter()
            .find(|p| p.sku == sku)
            .map(|p| p.special_price)
    }
}
