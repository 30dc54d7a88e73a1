//! Row structs for the `special_price_accounts` table.

use pricebook_core::account::{AccountSummary, OverrideEntry, SpecialPriceAccount};
use pricebook_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `special_price_accounts` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: DbId,
    pub email: String,
    pub user_name: String,
    pub products: Json<Vec<OverrideEntry>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AccountRow> for SpecialPriceAccount {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            user: row.user_name,
            products: row.products.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `(email, user_name)` projection for the account picker.
#[derive(Debug, Clone, FromRow)]
pub struct AccountSummaryRow {
    pub email: String,
    pub user_name: String,
}

impl From<AccountSummaryRow> for AccountSummary {
    fn from(row: AccountSummaryRow) -> Self {
        Self {
            email: row.email,
            user: row.user_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn row_maps_user_name_and_override_list() {
        let now = Utc::now();
        let row = AccountRow {
            id: 7,
            email: "a@b.com".into(),
            user_name: "Ana".into(),
            products: Json(vec![OverrideEntry {
                sku: "ABC123".into(),
                special_price: 7.5,
            }]),
            created_at: now,
            updated_at: now,
        };

        let account = SpecialPriceAccount::from(row);
        assert_eq!(account.user, "Ana");
        assert_eq!(account.products[0].sku, "ABC123");
    }

    #[test]
    fn override_list_is_stored_with_wire_names() {
        let json = serde_json::to_value(vec![OverrideEntry {
            sku: "ABC123".into(),
            special_price: 7.5,
        }])
        .unwrap();
        assert_eq!(json[0]["specialPrice"], 7.5);
    }
}
