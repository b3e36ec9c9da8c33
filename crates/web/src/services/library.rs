//! Wishlist and rental bookkeeping.
//!
//! The working lists live in the visitor's session; this service decides
//! when they are written to the user store. Rentals are persisted on every
//! rent, the wishlist only when the visitor saves it.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use bookrent_core::{AddOutcome, Rentals, UserId, WishlistItem};

use crate::db::{RepositoryError, UserStore};
use crate::error::add_breadcrumb;
use crate::middleware::Visitor;
use crate::models::CurrentUser;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result of [`LibraryService::rent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentOutcome {
    Rented { total_cost: i64 },
    LimitReached,
}

/// Persisted rental state as shown on the rent page.
#[derive(Debug, Clone)]
pub struct CommittedRentals {
    pub rented_books: Rentals,
    pub total_cost: i64,
}

pub struct LibraryService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> LibraryService<'a> {
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Add a book to the working wishlist.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Session` if the session cannot be read or written.
    #[instrument(skip(self, visitor))]
    pub async fn add_to_wishlist(
        &self,
        visitor: &Visitor,
        title: &str,
        url: &str,
    ) -> Result<AddOutcome, LibraryError> {
        let mut wishlist = visitor.working_wishlist().await?;
        let outcome = wishlist.add(title, url);
        match outcome {
            AddOutcome::Added => visitor.set_working_wishlist(&wishlist).await?,
            AddOutcome::Duplicate => info!("Book already in wishlist"),
            AddOutcome::MissingField => debug!("Ignoring wishlist entry with blank field"),
        }
        Ok(outcome)
    }

    /// Remove the working wishlist entry at `index`; out of range is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Session` if the session cannot be read or written.
    #[instrument(skip(self, visitor))]
    pub async fn remove_from_wishlist(
        &self,
        visitor: &Visitor,
        index: usize,
    ) -> Result<Option<WishlistItem>, LibraryError> {
        let mut wishlist = visitor.working_wishlist().await?;
        let removed = wishlist.remove(index);
        if removed.is_some() {
            visitor.set_working_wishlist(&wishlist).await?;
        } else {
            debug!(len = wishlist.len(), "Wishlist index out of range");
        }
        Ok(removed)
    }

    /// Overwrite the user's saved wishlist with the working one.
    ///
    /// The working copy is kept.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the session cannot be read or the store
    /// update fails.
    #[instrument(skip(self, user, visitor), fields(user_id = %user.id))]
    pub async fn save_wishlist(
        &self,
        user: &CurrentUser,
        visitor: &Visitor,
    ) -> Result<usize, LibraryError> {
        let wishlist = visitor.working_wishlist().await?;
        self.users.update_wishlist(user.id, &wishlist).await?;
        info!(count = wishlist.len(), "Wishlist saved");
        add_breadcrumb("library", "Wishlist saved", sentry::Level::Info);
        Ok(wishlist.len())
    }

    /// Rent a book: append it to the working rentals and persist the list
    /// with its new total.
    ///
    /// At the rental cap nothing changes and `RentOutcome::LimitReached` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the session or the store update fails.
    #[instrument(skip(self, user, visitor), fields(user_id = %user.id))]
    pub async fn rent(
        &self,
        user: &CurrentUser,
        visitor: &Visitor,
        title: &str,
        cost: i64,
    ) -> Result<RentOutcome, LibraryError> {
        let mut rentals = visitor.working_rentals().await?;
        if let Err(e) = rentals.rent(title, cost) {
            warn!(error = %e, "Rental limit reached");
            add_breadcrumb("library", "Rental limit reached", sentry::Level::Warning);
            return Ok(RentOutcome::LimitReached);
        }

        let total_cost = rentals.total_cost();
        visitor.set_working_rentals(&rentals).await?;
        self.persist_rentals(user.id, &rentals).await?;

        info!(count = rentals.len(), total_cost, "Book rented");
        Ok(RentOutcome::Rented { total_cost })
    }

    /// Persist the working rentals, then clear the working copy.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the session or the store update fails. The
    /// working copy is only cleared after a successful write.
    #[instrument(skip(self, user, visitor), fields(user_id = %user.id))]
    pub async fn save_rentals(
        &self,
        user: &CurrentUser,
        visitor: &Visitor,
    ) -> Result<i64, LibraryError> {
        let rentals = visitor.working_rentals().await?;
        let total_cost = self.persist_rentals(user.id, &rentals).await?;
        visitor.clear_working_rentals().await?;

        info!(count = rentals.len(), total_cost, "Rentals saved");
        add_breadcrumb("library", "Rentals saved", sentry::Level::Info);
        Ok(total_cost)
    }

    /// The user's persisted rentals, or `None` if the user record is gone.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Repository` if the store lookup fails.
    pub async fn committed_rentals(
        &self,
        user_id: UserId,
    ) -> Result<Option<CommittedRentals>, LibraryError> {
        Ok(self.users.get(user_id).await?.map(|user| CommittedRentals {
            rented_books: user.rented_books,
            total_cost: user.total_cost,
        }))
    }

    async fn persist_rentals(&self, id: UserId, rentals: &Rentals) -> Result<i64, LibraryError> {
        let total_cost = rentals.total_cost();
        self.users
            .update_rented_books(id, rentals, total_cost)
            .await?;
        Ok(total_cost)
    }
}
