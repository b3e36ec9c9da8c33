//! User document storage.
//!
//! # Database: `bookrent`
//!
//! ## Tables
//!
//! - `users` - One document per account: profile, password hash, saved
//!   wishlist, persisted rentals and their total (JSONB columns)
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p bookrent-cli -- migrate
//! ```
//!
//! Handlers only see the [`UserStore`] trait. [`PgUserStore`] backs the
//! running site; [`MemoryUserStore`] backs tests and local experiments.

mod memory;
mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use bookrent_core::{Email, Rentals, UserId, Wishlist};

use crate::models::{NewUser, User};

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

/// Errors returned by a [`UserStore`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Persistence for user documents.
///
/// Updates overwrite whole fields (last writer wins); there is no
/// optimistic concurrency.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// First user (lowest id) whose email matches exactly.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Insert a new user with an empty wishlist, no rentals and zero total.
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    async fn insert(&self, user: NewUser) -> Result<UserId, RepositoryError>;

    async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Replace the saved wishlist. `NotFound` if the user does not exist.
    async fn update_wishlist(&self, id: UserId, wishlist: &Wishlist)
    -> Result<(), RepositoryError>;

    /// Replace the persisted rentals and their total. `NotFound` if the user
    /// does not exist.
    async fn update_rented_books(
        &self,
        id: UserId,
        rented_books: &Rentals,
        total_cost: i64,
    ) -> Result<(), RepositoryError>;

    /// Cheap liveness probe used by the readiness endpoint.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
