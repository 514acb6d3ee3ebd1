/// In-memory user repository for tests
///
/// Mirrors the PostgreSQL behavior that matters to callers: sequential IDs
/// starting at 1, exact-match email uniqueness, and ID ordering on list.

use super::UserRepository;
use crate::error::{StoreError, StoreResult};
use crate::models::user::{NewUser, UpdateUser, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct State {
    next_id: i32,
    users: BTreeMap<i32, User>,
}

/// User repository holding rows in a map behind a lock
#[derive(Debug)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            state: RwLock::new(State {
                next_id: 1,
                users: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryUserRepository {
    /// Creates an empty repository; IDs start at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Whether no users are stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn create(&self, data: NewUser) -> StoreResult<User> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: state.next_id,
            username: data.username,
            email: data.email,
            created_date: Utc::now(),
        };
        state.next_id += 1;
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: i32, data: UpdateUser) -> StoreResult<Option<User>> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&id) {
            return Ok(None);
        }
        if state
            .users
            .values()
            .any(|u| u.id != id && u.email == data.email)
        {
            return Err(StoreError::DuplicateEmail);
        }

        let user = state.users.get_mut(&id).map(|user| {
            user.username = data.username;
            user.email = data.email;
            user.clone()
        });

        Ok(user)
    }

    async fn delete(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(self.state.write().await.users.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();
        let second = repo.create(new_user("john", "john@testdriven.io")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();

        let err = repo
            .create(new_user("other", "michael@testdriven.io"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();

        assert!(repo.find_by_email("MICHAEL@testdriven.io").await.unwrap().is_none());
        assert!(repo.find_by_email("michael@testdriven.io").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_date() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateUser {
                    username: "mike".to_string(),
                    email: "mike@testdriven.io".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_date, created.created_date);
        assert_eq!(updated.username, "mike");
        assert_eq!(updated.email, "mike@testdriven.io");
    }

    #[tokio::test]
    async fn test_update_allows_keeping_own_email() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateUser {
                    username: "mike".to_string(),
                    email: "michael@testdriven.io".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(updated.is_some());
    }

    #[tokio::test]
    async fn test_update_rejects_other_users_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();
        let john = repo.create(new_user("john", "john@testdriven.io")).await.unwrap();

        let err = repo
            .update(
                john.id,
                UpdateUser {
                    username: "john".to_string(),
                    email: "michael@testdriven.io".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = InMemoryUserRepository::new();

        let updated = repo
            .update(
                999,
                UpdateUser {
                    username: "me".to_string(),
                    email: "me@testdriven.io".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(updated.is_none());
        assert!(repo.delete(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_does_not_reuse_ids() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();

        let removed = repo.delete(first.id).await.unwrap().unwrap();
        assert_eq!(removed.email, "michael@testdriven.io");
        assert!(repo.is_empty().await);

        let next = repo.create(new_user("michael", "michael@testdriven.io")).await.unwrap();
        assert_eq!(next.id, 2);
    }
}
