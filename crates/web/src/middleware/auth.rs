//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in user in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::error;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, returns a redirect to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Like [`RequireAuth`], but rejects with `401 Unauthorized` instead of
/// redirecting. Used by the save actions.
pub struct RequireAuthStatus(pub CurrentUser);

/// Error returned when authentication is required but nobody is logged in,
/// or when the session store could not be read.
#[derive(Debug)]
pub enum AuthRejection {
    RedirectToLogin,
    Unauthorized,
    SessionUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::SessionUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Read the logged-in user from the request's session, if any.
///
/// A request without a session layer counts as anonymous; a store failure
/// does not.
async fn session_user(parts: &Parts) -> Result<Option<CurrentUser>, AuthRejection> {
    let Some(session) = parts.extensions.get::<Session>() else {
        return Ok(None);
    };
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to read session");
            sentry::capture_error(&e);
            AuthRejection::SessionUnavailable
        })
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts)
            .await?
            .map(Self)
            .ok_or(AuthRejection::RedirectToLogin)
    }
}

impl<S> FromRequestParts<S> for RequireAuthStatus
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts)
            .await?
            .map(Self)
            .ok_or(AuthRejection::Unauthorized)
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged
/// in. It only rejects when the session store fails.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts).await.map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::{Request, header::LOCATION};
    use tower_sessions::session::{Id, Record};
    use tower_sessions::{MemoryStore, SessionStore, session_store};

    use bookrent_core::{Email, UserId};

    use super::*;

    /// Session store whose backend is always down.
    #[derive(Debug, Clone)]
    struct BrokenStore;

    #[async_trait]
    impl SessionStore for BrokenStore {
        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            Err(session_store::Error::Backend("connection refused".to_string()))
        }

        async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
            Err(session_store::Error::Backend("connection refused".to_string()))
        }

        async fn delete(&self, _id: &Id) -> session_store::Result<()> {
            Err(session_store::Error::Backend("connection refused".to_string()))
        }
    }

    fn parts_with(session: Option<Session>) -> Parts {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();
        if let Some(session) = session {
            parts.extensions.insert(session);
        }
        parts
    }

    fn broken_session() -> Session {
        Session::new(Some(Id::default()), Arc::new(BrokenStore), None)
    }

    #[test]
    fn test_redirect_rejection_points_at_login() {
        let response = AuthRejection::RedirectToLogin.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    #[test]
    fn test_unauthorized_rejection_status() {
        let response = AuthRejection::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logged_in_user_is_extracted() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let user = CurrentUser {
            id: UserId::new(1),
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
        };
        session
            .insert(session_keys::CURRENT_USER, &user)
            .await
            .unwrap();
        let mut parts = parts_with(Some(session));

        let RequireAuth(extracted) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .ok()
            .unwrap();
        assert_eq!(extracted, user);
    }

    #[tokio::test]
    async fn test_anonymous_visitor_is_redirected() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let mut parts = parts_with(Some(session));

        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AuthRejection::RedirectToLogin));
    }

    #[tokio::test]
    async fn test_store_failure_is_a_server_error() {
        let mut parts = parts_with(Some(broken_session()));
        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AuthRejection::SessionUnavailable));
        assert_eq!(
            rejection.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let mut parts = parts_with(Some(broken_session()));
        let rejection = RequireAuthStatus::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AuthRejection::SessionUnavailable));

        let mut parts = parts_with(Some(broken_session()));
        let rejection = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AuthRejection::SessionUnavailable));
    }

    #[tokio::test]
    async fn test_missing_session_layer_counts_as_anonymous() {
        let mut parts = parts_with(None);
        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .ok()
            .unwrap();
        assert!(user.is_none());
    }
}
