//! Per-visitor session context.
//!
//! Everything a visitor accumulates between requests (identity snapshot,
//! working wishlist, working rental list) goes through [`Visitor`]. Writes to
//! the user store happen elsewhere, in `services::library`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use bookrent_core::{Rentals, Wishlist};

use crate::models::{CurrentUser, User, session_keys};

/// Typed view over the visitor's session.
#[derive(Debug, Clone)]
pub struct Visitor {
    session: Session,
}

impl Visitor {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The logged-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn current_user(&self) -> Result<Option<CurrentUser>, SessionError> {
        self.session.get(session_keys::CURRENT_USER).await
    }

    /// Start an authenticated session for `user`.
    ///
    /// Issues a fresh session id, stores the identity snapshot and seeds the
    /// working wishlist from the user's saved one. The working rental list is
    /// kept when the same account signs in again and dropped when a different
    /// account takes over the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn sign_in(&self, user: &User) -> Result<CurrentUser, SessionError> {
        let current = CurrentUser::from(user);
        if let Some(previous) = self.current_user().await?
            && previous.id != current.id
        {
            tracing::info!(
                previous_user_id = %previous.id,
                "Dropping working rentals of previous account"
            );
            self.clear_working_rentals().await?;
        }
        self.session.cycle_id().await?;
        self.session
            .insert(session_keys::CURRENT_USER, &current)
            .await?;
        self.set_working_wishlist(&user.wishlist).await?;
        Ok(current)
    }

    /// Drop the whole session, including unsaved wishlist edits.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be updated.
    pub async fn destroy(&self) -> Result<(), SessionError> {
        self.session.flush().await
    }

    /// The working wishlist; empty if none has been started.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn working_wishlist(&self) -> Result<Wishlist, SessionError> {
        Ok(self
            .session
            .get(session_keys::WISHLIST)
            .await?
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn set_working_wishlist(&self, wishlist: &Wishlist) -> Result<(), SessionError> {
        self.session.insert(session_keys::WISHLIST, wishlist).await
    }

    /// The working rental list; empty if none has been started.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn working_rentals(&self) -> Result<Rentals, SessionError> {
        Ok(self
            .session
            .get(session_keys::RENTED_BOOKS)
            .await?
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn set_working_rentals(&self, rentals: &Rentals) -> Result<(), SessionError> {
        self.session
            .insert(session_keys::RENTED_BOOKS, rentals)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn clear_working_rentals(&self) -> Result<(), SessionError> {
        self.session
            .remove::<Rentals>(session_keys::RENTED_BOOKS)
            .await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self::new)
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use tower_sessions::MemoryStore;

    use bookrent_core::{Email, UserId};

    use super::*;

    fn visitor() -> Visitor {
        Visitor::new(Session::new(None, Arc::new(MemoryStore::default()), None))
    }

    fn user_with_saved_wishlist() -> User {
        user(3, "ada@example.com")
    }

    fn user(id: i32, email: &str) -> User {
        let mut wishlist = Wishlist::new();
        wishlist.add("Dune", "http://x/dune");
        User {
            id: UserId::new(id),
            name: "Ada".to_string(),
            email: Email::parse(email).unwrap(),
            password_hash: "hash".to_string(),
            wishlist,
            rented_books: Rentals::new(),
            total_cost: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_fresh_visitor_has_empty_lists() {
        let visitor = visitor();
        assert!(visitor.current_user().await.unwrap().is_none());
        assert!(visitor.working_wishlist().await.unwrap().is_empty());
        assert!(visitor.working_rentals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_seeds_wishlist() {
        let visitor = visitor();
        let user = user_with_saved_wishlist();

        let current = visitor.sign_in(&user).await.unwrap();

        assert_eq!(current.id, user.id);
        assert_eq!(visitor.current_user().await.unwrap(), Some(current));
        assert_eq!(visitor.working_wishlist().await.unwrap(), user.wishlist);
    }

    #[tokio::test]
    async fn test_sign_in_as_same_user_keeps_rentals() {
        let visitor = visitor();
        let ada = user(3, "ada@example.com");
        visitor.sign_in(&ada).await.unwrap();
        let mut rentals = Rentals::new();
        rentals.rent("Emma", 3).unwrap();
        visitor.set_working_rentals(&rentals).await.unwrap();

        visitor.sign_in(&ada).await.unwrap();

        assert_eq!(visitor.working_rentals().await.unwrap(), rentals);
    }

    #[tokio::test]
    async fn test_sign_in_as_other_user_drops_rentals() {
        let visitor = visitor();
        visitor.sign_in(&user(3, "ada@example.com")).await.unwrap();
        let mut rentals = Rentals::new();
        rentals.rent("Emma", 3).unwrap();
        visitor.set_working_rentals(&rentals).await.unwrap();

        let grace = user(4, "grace@example.com");
        let current = visitor.sign_in(&grace).await.unwrap();

        assert_eq!(current.id, grace.id);
        assert!(visitor.working_rentals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_destroy_forgets_everything() {
        let visitor = visitor();
        visitor.sign_in(&user_with_saved_wishlist()).await.unwrap();
        let mut rentals = Rentals::new();
        rentals.rent("Emma", 3).unwrap();
        visitor.set_working_rentals(&rentals).await.unwrap();

        visitor.destroy().await.unwrap();

        assert!(visitor.current_user().await.unwrap().is_none());
        assert!(visitor.working_wishlist().await.unwrap().is_empty());
        assert!(visitor.working_rentals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_working_rentals() {
        let visitor = visitor();
        let mut rentals = Rentals::new();
        rentals.rent("Emma", 3).unwrap();
        visitor.set_working_rentals(&rentals).await.unwrap();

        visitor.clear_working_rentals().await.unwrap();

        assert!(visitor.working_rentals().await.unwrap().is_empty());
    }
}
