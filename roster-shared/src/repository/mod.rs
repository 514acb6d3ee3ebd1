/// User storage abstraction
///
/// Handlers never touch a database session directly. They receive an
/// `Arc<dyn UserRepository>` through application state, which keeps request
/// handling free of global state and lets tests swap in an in-memory store.
///
/// # Implementations
///
/// - [`PgUserRepository`]: PostgreSQL via sqlx; writes run in a transaction
/// - [`InMemoryUserRepository`]: `test-utils` feature only
///
/// # Example
///
/// ```no_run
/// use roster_shared::repository::{PgUserRepository, UserRepository};
/// use roster_shared::models::user::NewUser;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let repo = PgUserRepository::new(pool);
/// if repo.find_by_email("michael@testdriven.io").await?.is_none() {
///     repo.create(NewUser {
///         username: "michael".to_string(),
///         email: "michael@testdriven.io".to_string(),
///     })
///     .await?;
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::StoreResult;
use crate::models::user::{NewUser, UpdateUser, User};
use async_trait::async_trait;

pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use postgres::PgUserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryUserRepository;

/// Storage operations over the user table
///
/// Implementations must enforce email uniqueness themselves and report a
/// violation as [`StoreError::DuplicateEmail`](crate::error::StoreError::DuplicateEmail).
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>>;

    /// Finds a user by exact email match
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Lists all users ordered by ID
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Persists a new user, assigning its ID and creation timestamp
    async fn create(&self, data: NewUser) -> StoreResult<User>;

    /// Replaces username and email; `None` if the ID is unknown
    async fn update(&self, id: i32, data: UpdateUser) -> StoreResult<Option<User>>;

    /// Removes a user; returns the removed row, `None` if the ID is unknown
    async fn delete(&self, id: i32) -> StoreResult<Option<User>>;
}
