//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `BOOKRENT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! User table migrations live in `crates/web/migrations/`. The session table
//! is owned by `tower-sessions-sqlx-store` and created by its own migration.

use sqlx::PgPool;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Run the users table migrations.
///
/// # Errors
///
/// Returns `MigrationError::Migration` if a migration fails to apply.
pub async fn users(pool: &PgPool) -> Result<(), MigrationError> {
    tracing::info!("Running users migrations...");
    sqlx::migrate!("../web/migrations").run(pool).await?;
    tracing::info!("Users migrations complete!");
    Ok(())
}

/// Create the `tower_sessions` schema and session table.
///
/// # Errors
///
/// Returns `MigrationError::Database` if the table cannot be created.
pub async fn sessions(pool: PgPool) -> Result<(), MigrationError> {
    tracing::info!("Running session store migrations...");
    PostgresStore::new(pool).migrate().await?;
    tracing::info!("Session store migrations complete!");
    Ok(())
}
