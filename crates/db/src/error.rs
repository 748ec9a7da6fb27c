//! Repository error type.

use kencana_core::error::CoreError;

/// Errors surfaced by repositories: either a domain guard failure raised
/// inside a transaction, or a storage failure from sqlx.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Convenience alias for repository return values.
pub type DbResult<T> = Result<T, DbError>;
