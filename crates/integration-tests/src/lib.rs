//! End-to-end test harness for Bookrent.
//!
//! [`TestApp::spawn`] serves the real router on an ephemeral port backed by
//! in-memory user and session stores. Book searches go to a [`FakeCatalog`]
//! speaking the Google Books volumes format.
//!
//! # Test Categories
//!
//! - `accounts` - signup, login, logout and page gating
//! - `wishlist` - working wishlist edits and saving
//! - `rentals` - renting, the three book cap and saving
//! - `search` - catalog search rendering, caching and failures

#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::{Client, header::LOCATION, redirect};
use secrecy::SecretString;
use serde_json::json;
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;

use bookrent_core::Email;
use bookrent_web::build_app;
use bookrent_web::config::{AppConfig, CatalogConfig};
use bookrent_web::db::{MemoryUserStore, UserStore};
use bookrent_web::middleware::create_session_layer;
use bookrent_web::models::User;
use bookrent_web::state::AppState;

/// API key the fake catalog accepts.
pub const FAKE_API_KEY: &str = "test-books-key";

/// Search term for which the fake catalog answers with a body that is not JSON.
pub const MALFORMED_TERM: &str = "garbled";

/// Search term for which the fake catalog reports no `items`.
pub const EMPTY_TERM: &str = "nothing-matches";

const SESSION_SECRET: &str = "Vb3#nQ8$zR1!mK6@wT9^hJ2&pL5*cX7(eG4)sD0-fA8_uY3+iO6=tN1~kW5%rE9Zq";

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });
    addr
}

// ============================================================================
// Fake catalog
// ============================================================================

/// Stand-in for the Google Books `volumes` endpoint.
#[derive(Clone)]
pub struct FakeCatalog {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeCatalog {
    pub async fn spawn() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/volumes", get(volumes))
            .with_state(Arc::clone(&hits));
        let addr = serve(router).await;

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    /// Number of requests the catalog has received.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn volumes(
    State(hits): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    if params.get("key").map(String::as_str) != Some(FAKE_API_KEY) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "API key not valid"}})),
        )
            .into_response();
    }

    match params.get("q").map(String::as_str) {
        Some(MALFORMED_TERM) => "<html>not json</html>".into_response(),
        Some(EMPTY_TERM) => Json(json!({"kind": "books#volumes", "totalItems": 0})).into_response(),
        _ => Json(json!({
            "kind": "books#volumes",
            "totalItems": 2,
            "items": [
                {
                    "id": "dune-1965",
                    "volumeInfo": {
                        "title": "Dune",
                        "authors": ["Frank Herbert"],
                        "publishedDate": "1965",
                        "imageLinks": {
                            "smallThumbnail": "http://covers.test/dune-small.jpg",
                            "thumbnail": "http://covers.test/dune.jpg"
                        },
                        "infoLink": "http://books.test/dune"
                    }
                },
                {
                    "id": "anon-verses",
                    "volumeInfo": {
                        "title": "Anonymous Verses"
                    }
                }
            ]
        }))
        .into_response(),
    }
}

// ============================================================================
// Application under test
// ============================================================================

pub struct TestApp {
    pub base_url: String,
    pub users: Arc<MemoryUserStore>,
    pub catalog: FakeCatalog,
}

impl TestApp {
    /// Serve the site against a fresh [`FakeCatalog`].
    pub async fn spawn() -> Self {
        let catalog = FakeCatalog::spawn().await;
        let base = catalog.base_url.clone();
        Self::spawn_with(catalog, &base, FAKE_API_KEY).await
    }

    /// Serve the site with a catalog base URL nothing listens on.
    pub async fn spawn_with_unreachable_catalog() -> Self {
        let catalog = FakeCatalog::spawn().await;
        Self::spawn_with(catalog, "http://127.0.0.1:9", FAKE_API_KEY).await
    }

    /// Serve the site with an API key the catalog rejects.
    pub async fn spawn_with_rejected_key() -> Self {
        let catalog = FakeCatalog::spawn().await;
        let base = catalog.base_url.clone();
        Self::spawn_with(catalog, &base, "revoked-key").await
    }

    async fn spawn_with(catalog: FakeCatalog, catalog_base_url: &str, api_key: &str) -> Self {
        let config = AppConfig {
            database_url: SecretString::from("postgres://unused"),
            host: "127.0.0.1".parse().expect("Invalid host"),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            session_secret: SecretString::from(SESSION_SECRET),
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../web/static")),
            catalog: CatalogConfig {
                base_url: catalog_base_url.to_string(),
                api_key: SecretString::from(api_key),
                cache_ttl: Duration::from_secs(300),
                request_timeout: Duration::from_secs(2),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let users = Arc::new(MemoryUserStore::new());
        let session_layer = create_session_layer(MemoryStore::default(), &config)
            .expect("Failed to build session layer");
        let state = AppState::new(config, Arc::clone(&users) as Arc<dyn UserStore>)
            .expect("Failed to build app state");
        let addr = serve(build_app(state, session_layer)).await;

        Self {
            base_url: format!("http://{addr}"),
            users,
            catalog,
        }
    }

    /// A new visitor with an empty cookie jar.
    #[must_use]
    pub fn browser(&self) -> Browser {
        Browser {
            base_url: self.base_url.clone(),
            client: Client::builder()
                .cookie_store(true)
                .redirect(redirect::Policy::none())
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// The stored user record for `email`.
    pub async fn stored_user(&self, email: &str) -> User {
        let email = Email::parse(email).expect("Invalid email");
        self.users
            .find_by_email(&email)
            .await
            .expect("Store lookup failed")
            .expect("User not stored")
    }
}

/// One visitor's HTTP client. Redirects are not followed so tests can
/// assert on them.
pub struct Browser {
    base_url: String,
    client: Client,
}

impl Browser {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// GET `path` and return the body, asserting a 200.
    pub async fn page(&self, path: &str) -> String {
        let resp = self.get(path).await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "GET {path}");
        resp.text().await.expect("Failed to read body")
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post(
            "/signup",
            &[("name", name), ("email", email), ("password", password)],
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login", &[("email", email), ("password", password)])
            .await
    }

    /// Register and log in, asserting both redirects.
    pub async fn signup_and_login(&self, name: &str, email: &str, password: &str) {
        let resp = self.signup(name, email, password).await;
        assert_eq!(location(&resp), "/login");
        let resp = self.login(email, password).await;
        assert_eq!(location(&resp), "/dashboard");
    }

    pub async fn add_to_wishlist(&self, title: &str, url: &str) -> reqwest::Response {
        self.post("/add-to-wishlist", &[("title", title), ("url", url)])
            .await
    }

    pub async fn rent(&self, title: &str, cost: &str) -> reqwest::Response {
        self.post("/rent-book", &[("title", title), ("cost", cost)])
            .await
    }
}

/// The `Location` of a 303 redirect.
#[must_use]
pub fn location(resp: &reqwest::Response) -> String {
    assert_eq!(
        resp.status(),
        reqwest::StatusCode::SEE_OTHER,
        "expected a redirect"
    );
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Redirect without Location")
        .to_string()
}
