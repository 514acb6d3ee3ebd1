/// PostgreSQL-backed user repository
///
/// Reads go straight to the pool. Writes open a transaction, commit on
/// success and roll back explicitly on any failure, so a failed insert never
/// leaves a partial row behind.

use super::UserRepository;
use crate::error::StoreResult;
use crate::models::user::{NewUser, UpdateUser, User};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

/// User repository over a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Commits `tx` if `result` is Ok, otherwise rolls it back
    async fn finish<T>(
        tx: Transaction<'_, Postgres>,
        result: Result<T, sqlx::Error>,
    ) -> StoreResult<T> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Write failed, rolling back transaction");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Transaction rollback failed");
                }
                Err(err.into())
            }
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn create(&self, data: NewUser) -> StoreResult<User> {
        let mut tx = self.pool.begin().await?;
        let result = User::create(&mut *tx, data).await;
        let user = Self::finish(tx, result).await?;

        debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn update(&self, id: i32, data: UpdateUser) -> StoreResult<Option<User>> {
        let mut tx = self.pool.begin().await?;
        let result = User::update(&mut *tx, id, data).await;
        Self::finish(tx, result).await
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<User>> {
        let mut tx = self.pool.begin().await?;
        let result = User::delete(&mut *tx, id).await;
        Self::finish(tx, result).await
    }
}
