//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use bookrent_core::WishlistItem;

use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAuth, RequireAuthStatus, Visitor};
use crate::models::CurrentUser;
use crate::services::library::LibraryService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AddToWishlistForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// The index arrives as text; anything that is not a non-negative integer
/// removes nothing.
#[derive(Debug, Deserialize)]
pub struct DeleteFromWishlistForm {
    #[serde(default)]
    pub index: String,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "wishlist.html")]
pub struct WishlistTemplate {
    pub current_user: Option<CurrentUser>,
    pub items: Vec<WishlistItem>,
}

// =============================================================================
// Routes
// =============================================================================

/// Show the working (possibly unsaved) wishlist.
pub async fn show(RequireAuth(user): RequireAuth, visitor: Visitor) -> Result<impl IntoResponse> {
    let wishlist = visitor.working_wishlist().await?;

    Ok(WishlistTemplate {
        current_user: Some(user),
        items: wishlist.items().to_vec(),
    })
}

#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    visitor: Visitor,
    Form(form): Form<AddToWishlistForm>,
) -> Result<Redirect> {
    LibraryService::new(state.users())
        .add_to_wishlist(&visitor, &form.title, &form.url)
        .await?;

    Ok(Redirect::to("/wishlist"))
}

#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    visitor: Visitor,
    Form(form): Form<DeleteFromWishlistForm>,
) -> Result<Redirect> {
    if let Ok(index) = form.index.trim().parse::<usize>() {
        LibraryService::new(state.users())
            .remove_from_wishlist(&visitor, index)
            .await?;
    }

    Ok(Redirect::to("/wishlist"))
}

/// Persist the working wishlist to the user's record.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn save(
    State(state): State<AppState>,
    RequireAuthStatus(user): RequireAuthStatus,
    visitor: Visitor,
) -> Result<Redirect> {
    LibraryService::new(state.users())
        .save_wishlist(&user, &visitor)
        .await?;

    Ok(Redirect::to("/wishlist"))
}
