//! Repository for the `special_price_accounts` table.

use pricebook_core::account::{NewAccount, SpecialPriceAccount};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::account::{AccountRow, AccountSummaryRow};

/// Column list for the `special_price_accounts` table.
const COLUMNS: &str = "id, email, user_name, products, created_at, updated_at";

pub struct SpecialPriceRepo;

impl SpecialPriceRepo {
    /// `(email, user_name)` for every account, newest first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<AccountSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, AccountSummaryRow>(
            "SELECT email, user_name FROM special_price_accounts \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find an account by its normalized email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM special_price_accounts WHERE email = $1");
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new account. A taken email fails on `uq_special_price_accounts_email`.
    pub async fn create(pool: &PgPool, input: &NewAccount) -> Result<AccountRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO special_price_accounts \
                (email, user_name, products, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(&input.email)
            .bind(&input.user)
            .bind(Json(&input.products))
            .bind(input.created_at)
            .bind(input.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the mutable fields of the account with `account.email`.
    ///
    /// Returns `None` when no such account exists.
    pub async fn save(
        pool: &PgPool,
        account: &SpecialPriceAccount,
    ) -> Result<Option<AccountRow>, sqlx::Error> {
        let query = format!(
            "UPDATE special_price_accounts SET \
                user_name = $2, products = $3, updated_at = $4 \
             WHERE email = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccountRow>(&query)
            .bind(&account.email)
            .bind(&account.user)
            .bind(Json(&account.products))
            .bind(account.updated_at)
            .fetch_optional(pool)
            .await
    }
}
