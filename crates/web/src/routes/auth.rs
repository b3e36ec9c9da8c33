//! Authentication route handlers.
//!
//! Password signup, login and logout. Failures are answered with a plain
//! `400` and a short message rather than a re-rendered form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, Visitor};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form data.
#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
}

#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub current_user: Option<CurrentUser>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    LoginTemplate { current_user }
}

/// Handle login form submission.
///
/// On success the session gets the user snapshot and the saved wishlist.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let user = AuthService::new(state.users())
        .login(&form.email, &form.password)
        .await?;

    let current = visitor.sign_in(&user).await?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    Ok(Redirect::to("/dashboard"))
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    SignupTemplate { current_user }
}

/// Handle signup form submission.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    AuthService::new(state.users())
        .signup(&form.name, &form.email, &form.password)
        .await?;

    Ok(Redirect::to("/login"))
}

// =============================================================================
// Logout
// =============================================================================

/// Destroy the whole session, discarding unsaved wishlist edits.
#[instrument(skip_all)]
pub async fn logout(visitor: Visitor) -> Result<Redirect> {
    visitor.destroy().await?;
    clear_sentry_user();
    info!("User logged out");

    Ok(Redirect::to("/login"))
}
