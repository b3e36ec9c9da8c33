//! In-process user store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use bookrent_core::{Email, Rentals, UserId, Wishlist};

use super::{RepositoryError, UserStore};
use crate::models::{NewUser, User};

/// [`UserStore`] kept in memory, with ids assigned sequentially from 1.
///
/// Enforces the same email uniqueness as the `users` table.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i32,
    users: BTreeMap<UserId, User>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| &u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        inner.last_id += 1;
        let id = UserId::new(inner.last_id);
        inner.users.insert(
            id,
            User {
                id,
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                wishlist: Wishlist::new(),
                rented_books: Rentals::new(),
                total_cost: 0,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn update_wishlist(
        &self,
        id: UserId,
        wishlist: &Wishlist,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        user.wishlist = wishlist.clone();
        Ok(())
    }

    async fn update_rented_books(
        &self,
        id: UserId,
        rented_books: &Rentals,
        total_cost: i64,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        user.rented_books = rented_books.clone();
        user.total_cost = total_cost;
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Reader".to_string(),
            email: Email::parse(email).unwrap(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryUserStore::new();
        let a = store.insert(new_user("a@x.com")).await.unwrap();
        let b = store.insert(new_user("b@x.com")).await.unwrap();
        assert_eq!(a, UserId::new(1));
        assert_eq!(b, UserId::new(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_insert_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.insert(new_user("a@x.com")).await.unwrap();
        let err = store.insert(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_new_user_starts_empty() {
        let store = MemoryUserStore::new();
        let id = store.insert(new_user("a@x.com")).await.unwrap();
        let user = store.get(id).await.unwrap().unwrap();
        assert!(user.wishlist.is_empty());
        assert!(user.rented_books.is_empty());
        assert_eq!(user.total_cost, 0);
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let store = MemoryUserStore::new();
        store.insert(new_user("a@x.com")).await.unwrap();
        let email = Email::parse("A@x.com").unwrap();
        assert!(store.find_by_email(&email).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_updates_replace_fields() {
        let store = MemoryUserStore::new();
        let id = store.insert(new_user("a@x.com")).await.unwrap();

        let mut wishlist = Wishlist::new();
        wishlist.add("Dune", "http://x");
        store.update_wishlist(id, &wishlist).await.unwrap();

        let mut rentals = Rentals::new();
        rentals.rent("Emma", 4).unwrap();
        store.update_rented_books(id, &rentals, 4).await.unwrap();

        let user = store.get(id).await.unwrap().unwrap();
        assert_eq!(user.wishlist, wishlist);
        assert_eq!(user.rented_books, rentals);
        assert_eq!(user.total_cost, 4);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let store = MemoryUserStore::new();
        let err = store
            .update_wishlist(UserId::new(99), &Wishlist::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
