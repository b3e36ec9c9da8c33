//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BOOKRENT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `BOOKRENT_SESSION_SECRET` - Cookie signing secret (min 64 chars, high entropy)
//! - `BOOKS_API_KEY` - Google Books API key
//!
//! ## Optional
//! - `BOOKRENT_HOST` - Bind address (default: 127.0.0.1)
//! - `BOOKRENT_PORT` - Listen port (default: 9000)
//! - `BOOKRENT_BASE_URL` - Public URL of the site (default: <http://localhost:9000>)
//! - `BOOKRENT_STATIC_DIR` - Static asset directory (default: crates/web/static)
//! - `BOOKS_API_BASE_URL` - Catalog endpoint root (default: <https://www.googleapis.com/books/v1>)
//! - `BOOKS_CACHE_TTL_SECONDS` - How long search results are cached (default: 300)
//! - `BOOKS_REQUEST_TIMEOUT_SECONDS` - Catalog request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Cookie signing keys must be at least 64 bytes.
const MIN_SESSION_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "keyboard cat",
];

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://www.googleapis.com/books/v1";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL; an `https` scheme marks session cookies `Secure`
    pub base_url: String,
    /// Cookie signing secret
    pub session_secret: SecretString,
    pub static_dir: PathBuf,
    pub catalog: CatalogConfig,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

/// Book catalog (Google Books) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Endpoint root; `/volumes` is appended
    pub base_url: String,
    pub api_key: SecretString,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("cache_ttl", &self.cache_ttl)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation (length, placeholder detection,
    /// entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("BOOKRENT_DATABASE_URL")?;
        let host = get_env_or_default("BOOKRENT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKRENT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BOOKRENT_PORT", "9000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKRENT_PORT".to_string(), e.to_string()))?;
        let base_url = get_url_or_default("BOOKRENT_BASE_URL", "http://localhost:9000")?;

        let session_secret = get_required_env("BOOKRENT_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "BOOKRENT_SESSION_SECRET")?;
        validate_secret_strength(&session_secret, "BOOKRENT_SESSION_SECRET")?;

        let static_dir = PathBuf::from(get_env_or_default("BOOKRENT_STATIC_DIR", "crates/web/static"));

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret: SecretString::from(session_secret),
            static_dir,
            catalog: CatalogConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over TLS.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// The session secret as raw key material.
    #[must_use]
    pub fn session_key_bytes(&self) -> &[u8] {
        self.session_secret.expose_secret().as_bytes()
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_url_or_default("BOOKS_API_BASE_URL", DEFAULT_CATALOG_BASE_URL)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: SecretString::from(get_required_env("BOOKS_API_KEY")?),
            cache_ttl: get_seconds_or_default("BOOKS_CACHE_TTL_SECONDS", 300)?,
            request_timeout: get_seconds_or_default("BOOKS_REQUEST_TIMEOUT_SECONDS", 10)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an absolute URL, rejecting anything `url` cannot parse.
fn get_url_or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(value)
}

fn get_seconds_or_default(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_seconds(key, &raw),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

fn parse_seconds(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a session secret is long enough to serve as a signing key.
fn validate_session_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                secret.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject placeholders and low-entropy values.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
