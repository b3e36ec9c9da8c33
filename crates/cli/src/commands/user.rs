//! Account management commands.

use sqlx::PgPool;

use bookrent_web::db::PgUserStore;
use bookrent_web::services::auth::{AuthError, AuthService};

/// Register an account with the same validation as the signup page.
///
/// # Errors
///
/// Returns `AuthError` if a field is blank, the email is malformed or
/// already registered, or the store write fails.
pub async fn create(
    pool: PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), AuthError> {
    let store = PgUserStore::new(pool);
    let id = AuthService::new(&store).signup(name, email, password).await?;

    tracing::info!("User created successfully! ID: {}, Email: {}", id, email.trim());
    Ok(())
}
