//! Home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::CurrentUser;

/// Home page template (search form).
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Display the home page.
pub async fn home(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate { current_user }
}

/// The home page for logged-in visitors.
pub async fn books(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    HomeTemplate {
        current_user: Some(user),
    }
}
