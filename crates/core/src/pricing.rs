//! Reconciliation of override lists against the catalog.
//!
//! Pure functions only; the service feeds them what it read from the stores.

use std::collections::{HashMap, HashSet};

use crate::account::{OverrideEntry, ResolvedOverride, SpecialPriceAccount};
use crate::catalog::ProductSnapshot;
use crate::types::Timestamp;

/// Distinct SKUs of `entries`, in first-seen order.
pub fn distinct_skus(entries: &[OverrideEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|e| seen.insert(e.sku.as_str()))
        .map(|e| e.sku.clone())
        .collect()
}

/// SKUs referenced by `entries` that are absent from `known`.
///
/// Each missing SKU is reported once, in submission order. Duplicate
/// entries for a known SKU are not an error.
pub fn missing_skus(entries: &[OverrideEntry], known: &HashSet<String>) -> Vec<String> {
    distinct_skus(entries)
        .into_iter()
        .filter(|sku| !known.contains(sku))
        .collect()
}

/// Error message listing missing SKUs.
pub fn missing_skus_message(missing: &[String]) -> String {
    format!("SKUs not found: {}", missing.join(", "))
}

/// Join every entry with its catalog snapshot, `None` for dangling SKUs.
pub fn resolve_overrides(
    entries: &[OverrideEntry],
    catalog: &HashMap<String, ProductSnapshot>,
) -> Vec<ResolvedOverride> {
    entries
        .iter()
        .map(|e| ResolvedOverride {
            sku: e.sku.clone(),
            special_price: e.special_price,
            product: catalog.get(&e.sku).cloned(),
        })
        .collect()
}

/// Changes requested on an existing account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountChanges {
    pub user: Option<String>,
    /// Full replacement list; `None` keeps the current list.
    pub products: Option<Vec<OverrideEntry>>,
}

/// Apply `changes` to `account`, stamping `updated_at` with `now`.
///
/// The override list is replaced wholesale, never merged. The timestamp is
/// bumped even when neither field changes, and always moves forward by at
/// least one microsecond (the resolution Postgres stores).
pub fn apply_changes(
    mut account: SpecialPriceAccount,
    changes: AccountChanges,
    now: Timestamp,
) -> SpecialPriceAccount {
    if let Some(user) = changes.user {
        account.user = user;
    }
    if let Some(products) = changes.products.filter(|p| !p.is_empty()) {
        account.products = products;
    }
    account.updated_at = now.max(account.updated_at + chrono::Duration::microseconds(1));
    account
}
