//! Repository Module
//!
//! Free-function CRUD over the SQLite pool, one module per table.
//! Domain guards that belong to a single record (status transitions,
//! delete preconditions) live here; cross-record orchestration lives
//! in the handlers.

// Accounts
pub mod guest;
pub mod staff;
pub mod token;

// Inventory
pub mod hotel;
pub mod room;

// Ledger
pub mod booking;
pub mod payment;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // SQLITE_CONSTRAINT_UNIQUE (2067) / SQLITE_CONSTRAINT_PRIMARYKEY (1555)
            if let Some(code) = db_err.code()
                && (code == "2067" || code == "1555")
            {
                return RepoError::Duplicate(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::AppError::NotFound(msg),
            RepoError::Duplicate(msg) => crate::AppError::Conflict(msg),
            RepoError::InvalidState(msg) => crate::AppError::InvalidState(msg),
            RepoError::Database(msg) => crate::AppError::Database(msg),
            RepoError::Validation(msg) => crate::AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Page/limit to LIMIT/OFFSET with the original's defaults (page 1, 10 rows)
pub fn page_window(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).max(1);
    (page, limit, (page - 1) * limit)
}

/// Total page count for a result set
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 { 0 } else { (total + limit - 1) / limit }
}
