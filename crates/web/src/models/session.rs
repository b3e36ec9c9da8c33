//! Session-related types.
//!
//! Types stored in the session for authentication state and working lists.

use serde::{Deserialize, Serialize};

use bookrent_core::{Email, UserId};

use super::user::User;

/// Session-stored user identity.
///
/// Snapshot taken at login; not refreshed if the stored record changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the working (unsaved) wishlist.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the working rental list.
    pub const RENTED_BOOKS: &str = "rented_books";
}
