//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_user: Option<CurrentUser>,
    pub user: CurrentUser,
}

/// Show the logged-in user's profile.
pub async fn dashboard(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    DashboardTemplate {
        current_user: Some(user.clone()),
        user,
    }
}
