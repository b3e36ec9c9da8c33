//! Session middleware configuration.
//!
//! Sessions are stored server-side (`PostgreSQL` in production, memory in
//! tests); the cookie only carries a signed session id.

use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::{AppConfig, ConfigError};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bookrent_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session layer type produced by [`create_session_layer`].
pub type SessionLayer<S> = SessionManagerLayer<S, SignedCookie>;

/// Create the session layer over `store`.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` if the session secret is too short
/// to serve as a signing key.
pub fn create_session_layer<S>(store: S, config: &AppConfig) -> Result<SessionLayer<S>, ConfigError>
where
    S: SessionStore + Clone,
{
    let key = Key::try_from(config.session_key_bytes()).map_err(|e| {
        ConfigError::InsecureSecret("BOOKRENT_SESSION_SECRET".to_string(), e.to_string())
    })?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_https())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
