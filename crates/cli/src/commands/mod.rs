//! CLI command implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect to the database named by `BOOKRENT_DATABASE_URL` (or `DATABASE_URL`).
///
/// # Errors
///
/// Returns `ConnectError` if neither variable is set or the connection fails.
pub async fn connect() -> Result<PgPool, ConnectError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("BOOKRENT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConnectError::MissingEnvVar("BOOKRENT_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(bookrent_web::db::create_pool(&database_url).await?)
}
