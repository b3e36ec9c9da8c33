//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use bookrent_core::{Email, Rentals, UserId, Wishlist};

/// A stored user document.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Argon2 PHC string; never rendered or logged.
    pub password_hash: String,
    /// Last saved wishlist.
    pub wishlist: Wishlist,
    /// Last persisted rental list.
    pub rented_books: Rentals,
    /// Total recorded alongside `rented_books` when they were persisted.
    pub total_cost: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a user; lists start empty and the total at zero.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
}
