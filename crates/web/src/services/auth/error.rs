//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] bookrent_core::EmailError),

    /// A required form field was blank.
    #[error("missing {0}")]
    MissingField(&'static str),

    /// No account with the given email.
    #[error("user not found")]
    UserNotFound,

    /// Wrong password for an existing account.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("password hashing error")]
    PasswordHash,
}
