//! Translation of sqlx failures into domain errors.

use pricebook_core::error::CoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Persistence-layer error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `uq_*` constraint rejected the write.
    #[error("Duplicate resource: {field} already exists")]
    UniqueViolation { field: String },

    #[error("Database error: {0}")]
    Query(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                    return DbError::UniqueViolation {
                        field: constrained_field(constraint).to_string(),
                    };
                }
            }
        }
        DbError::Query(err)
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { .. } => CoreError::Conflict(err.to_string()),
            DbError::Query(inner) => {
                tracing::error!(error = %inner, "Database error");
                CoreError::Internal(inner.to_string())
            }
        }
    }
}

/// Map a sqlx error straight onto [`CoreError`].
///
/// - Unique violations on `uq_*` constraints become `Conflict`.
/// - Everything else becomes `Internal`; the detail is logged, not exposed.
pub fn classify(err: sqlx::Error) -> CoreError {
    DbError::from(err).into()
}

/// Column name encoded in a `uq_<table>_<column>` constraint name.
pub fn constrained_field(constraint: &str) -> &str {
    constraint.rsplit('_').next().unwrap_or(constraint)
}
