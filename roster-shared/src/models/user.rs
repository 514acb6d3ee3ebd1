/// User model and database operations
///
/// This module provides the User model and the SQL behind every user
/// operation. All functions are generic over [`sqlx::PgExecutor`] so they run
/// equally against the pool or inside a transaction.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     username VARCHAR(128) NOT NULL,
///     email VARCHAR(128) NOT NULL,
///     created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// CREATE UNIQUE INDEX users_email_key ON users (email);
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_shared::models::user::{User, NewUser};
/// use roster_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     NewUser {
///         username: "michael".to_string(),
///         email: "michael@testdriven.io".to_string(),
///     },
/// )
/// .await?;
/// println!("Created user: {}", user.id);
///
/// let found = User::find_by_email(&pool, "michael@testdriven.io").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// A registered account, identified by its unique email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// System-assigned ID
    pub id: i32,

    /// Display name
    pub username: String,

    /// Email address (exact-match unique across all users)
    pub email: String,

    /// Set once at creation
    pub created_date: DateTime<Utc>,
}

/// Input for registering a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

/// Replacement values for an existing user's mutable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
}

impl User {
    /// Inserts a new user and returns it with its generated ID and timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create<'e, E>(executor: E, data: NewUser) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            RETURNING id, username, email, created_date
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_date
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by exact email match
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use roster_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(u) = User::find_by_email(&pool, "user@example.com").await? {
    ///     println!("Found user: {}", u.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_date
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Lists every user, oldest ID first
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_date
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(users)
    }

    /// Replaces a user's username and email
    ///
    /// Returns `None` if no user has the given ID. `id` and `created_date`
    /// are never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the new email belongs to another user (unique
    /// constraint violation) or the database connection fails.
    pub async fn update<'e, E>(
        executor: E,
        id: i32,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3
            WHERE id = $1
            RETURNING id, username, email, created_date
            "#,
        )
        .bind(id)
        .bind(data.username)
        .bind(data.email)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID, returning the removed row
    ///
    /// ⚠️  **WARNING**: This permanently deletes the user.
    pub async fn delete<'e, E>(executor: E, id: i32) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, username, email, created_date
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_serializes_created_date_as_rfc3339() {
        let user = User {
            id: 1,
            username: "michael".to_string(),
            email: "michael@testdriven.io".to_string(),
            created_date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "michael");
        assert_eq!(json["email"], "michael@testdriven.io");
        assert_eq!(json["created_date"], "2024-05-01T12:00:00Z");
    }

    // Integration tests for database operations are in tests/pg_user_tests.rs
}
