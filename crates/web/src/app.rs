//! Router assembly.
//!
//! Shared by the binary and the integration tests so both serve the exact
//! same middleware stack; only the user store and session store differ.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tracing::Span;

use crate::middleware::{SessionLayer, request_id_middleware};
use crate::routes;
use crate::state::AppState;

/// Build the full application router.
pub fn build_app<S>(state: AppState, session_layer: SessionLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the user store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.users().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header::LOCATION};
    use secrecy::SecretString;
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::config::{AppConfig, CatalogConfig};
    use crate::db::MemoryUserStore;
    use crate::middleware::create_session_layer;

    fn app() -> Router {
        let config = AppConfig {
            database_url: SecretString::from("postgres://localhost/unused"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:9000".to_string(),
            session_secret: SecretString::from(
                "Vb3#nQ8$zR1!mK6@wT9^hJ2&pL5*cX7(eG4)sD0-fA8_uY3+iO6=tN1~kW5%rE9Zq",
            ),
            static_dir: PathBuf::from("static"),
            catalog: CatalogConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: SecretString::from("test-key"),
                cache_ttl: Duration::from_secs(60),
                request_timeout: Duration::from_secs(1),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };
        let layer = create_session_layer(MemoryStore::default(), &config).unwrap();
        let state = AppState::new(config, Arc::new(MemoryUserStore::new())).unwrap();
        build_app(state, layer)
    }

    async fn send(method: &str, uri: &str) -> axum::response::Response {
        app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send("GET", "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_readiness_with_memory_store() {
        assert_eq!(send("GET", "/health/ready").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pages_redirect_anonymous_visitors() {
        for uri in ["/books", "/dashboard", "/wishlist", "/rent"] {
            let response = send("GET", uri).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
        }
    }

    #[tokio::test]
    async fn test_save_actions_reject_anonymous_visitors() {
        for uri in ["/save-wishlist", "/save-rented-books"] {
            assert_eq!(
                send("POST", uri).await.status(),
                StatusCode::UNAUTHORIZED,
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = send("GET", "/health").await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}
