/// Storage error types
///
/// Every [`UserRepository`](crate::repository::UserRepository) operation
/// returns [`StoreError`]. The API layer maps `DuplicateEmail` to a client
/// error and everything else to an internal error.

use thiserror::Error;

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// The `email` unique constraint rejected the write
    #[error("email already exists")]
    DuplicateEmail,

    /// Any other database failure (connection, query, commit)
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::DuplicateEmail;
            }
        }

        StoreError::Database(err)
    }
}
