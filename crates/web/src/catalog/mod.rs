//! Google Books catalog client.
//!
//! # Architecture
//!
//! - The catalog is the source of truth - no local copy of book data
//! - One `GET {base}/volumes?q=<term>&key=<api key>` per uncached search
//! - Successful results are cached in-memory via `moka`, keyed by term
//! - No retries; callers surface any failure as a search error
//!
//! # Example
//!
//! ```rust,ignore
//! use bookrent_web::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let books = client.search("dune").await?;
//! ```

mod conversions;
pub mod types;

use std::sync::Arc;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::CatalogConfig;

pub use types::{BookSummary, DEFAULT_COVER_URL, UNKNOWN_AUTHOR};

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the Google Books volumes endpoint.
///
/// Cheap to clone; clones share the HTTP connection pool and result cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    cache: Cache<String, Vec<BookSummary>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                endpoint: format!("{}/volumes", config.base_url),
                api_key: config.api_key.clone(),
                cache,
            }),
        })
    }

    /// Search the catalog for books matching `term`.
    ///
    /// A blank term yields no results without contacting the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, a non-success status, or
    /// a malformed body. Failures are not cached.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<BookSummary>, CatalogError> {
        info!(term, "Searching catalog");

        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        if let Some(books) = self.inner.cache.get(term).await {
            debug!(count = books.len(), "Cache hit for catalog search");
            return Ok(books);
        }

        let response = self
            .inner
            .client
            .get(&self.inner.endpoint)
            .query(&[("q", term), ("key", self.inner.api_key.expose_secret())])
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        let volumes: types::VolumesResponse = match serde_json::from_str(&response_text) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        let books = conversions::convert_volumes(volumes);
        debug!(count = books.len(), "Catalog search complete");

        self.inner
            .cache
            .insert(term.to_string(), books.clone())
            .await;

        Ok(books)
    }
}
