//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server-side failures are
//! captured to Sentry and logged before a plain-text response is sent;
//! internal details never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::library::LibraryError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Book search failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found; the message is shown to the client.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from client; the message is shown to the client.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_)
            | Self::Catalog(_)
            | Self::Library(_)
            | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::UserNotFound
                | AuthError::UserAlreadyExists
                | AuthError::InvalidEmail(_)
                | AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Catalog(_) => "Error searching books".to_string(),
            Self::Database(_) | Self::Library(_) | Self::Session(_) => {
                "Internal server error".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid password or user".to_string(),
                AuthError::UserNotFound => "User not found".to_string(),
                AuthError::UserAlreadyExists => "User already exists".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::MissingField(field) => format!("Missing {field}"),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "Internal server error".to_string()
                }
            },
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        (status, self.client_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context (logout).
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Record a user action so it shows in the trail of later error reports.
pub fn add_breadcrumb(category: &str, message: &str, level: sentry::Level) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level,
        ..Default::default()
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_auth_errors_are_bad_requests() {
        assert_eq!(
            render(AuthError::UserAlreadyExists.into()).await,
            (StatusCode::BAD_REQUEST, "User already exists".to_string())
        );
        assert_eq!(
            render(AuthError::InvalidCredentials.into()).await,
            (StatusCode::BAD_REQUEST, "Invalid password or user".to_string())
        );
        assert_eq!(
            render(AuthError::UserNotFound.into()).await,
            (StatusCode::BAD_REQUEST, "User not found".to_string())
        );
        assert_eq!(
            render(AuthError::MissingField("name").into()).await,
            (StatusCode::BAD_REQUEST, "Missing name".to_string())
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let (status, body) = render(AppError::Database(RepositoryError::DataCorruption(
            "bad row 17".to_string(),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal server error");

        let (status, body) = render(AppError::Catalog(CatalogError::Status {
            status: 403,
            body: "quota".to_string(),
        }))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error searching books");
    }

    #[tokio::test]
    async fn test_client_errors() {
        assert_eq!(
            render(AppError::NotFound("User not found".to_string())).await.0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            render(AppError::BadRequest("Invalid cost".to_string())).await,
            (StatusCode::BAD_REQUEST, "Invalid cost".to_string())
        );
    }
}
