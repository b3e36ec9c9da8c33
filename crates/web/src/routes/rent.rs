//! Rental route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use bookrent_core::RentedBook;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAuth, RequireAuthStatus, Visitor};
use crate::models::CurrentUser;
use crate::services::library::{LibraryService, RentOutcome};
use crate::state::AppState;

/// Shown on the rent page after a rejected fourth rental.
pub const LIMIT_MESSAGE: &str = "You can only rent up to three books.";

/// Query value that marks a rejected rental.
const LIMIT_ERROR: &str = "limit";

// =============================================================================
// Form / Query Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RentForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cost: String,
}

#[derive(Debug, Deserialize)]
pub struct RentQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "rent.html")]
pub struct RentTemplate {
    pub current_user: Option<CurrentUser>,
    pub rented_books: Vec<RentedBook>,
    pub total_cost: i64,
    pub error: Option<&'static str>,
}

// =============================================================================
// Routes
// =============================================================================

/// Show the persisted rentals.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<RentQuery>,
) -> Result<impl IntoResponse> {
    let committed = LibraryService::new(state.users())
        .committed_rentals(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(RentTemplate {
        current_user: Some(user),
        rented_books: committed.rented_books.books().to_vec(),
        total_cost: committed.total_cost,
        error: (query.error.as_deref() == Some(LIMIT_ERROR)).then_some(LIMIT_MESSAGE),
    })
}

/// Rent a book and persist the rental list right away.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn rent_book(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    visitor: Visitor,
    Form(form): Form<RentForm>,
) -> Result<Redirect> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Missing title".to_string()));
    }
    let cost = parse_cost(&form.cost)?;

    let outcome = LibraryService::new(state.users())
        .rent(&user, &visitor, title, cost)
        .await?;

    Ok(match outcome {
        RentOutcome::Rented { .. } => Redirect::to("/rent"),
        RentOutcome::LimitReached => Redirect::to("/rent?error=limit"),
    })
}

/// Persist the working rentals and clear them from the session.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn save_rented_books(
    State(state): State<AppState>,
    RequireAuthStatus(user): RequireAuthStatus,
    visitor: Visitor,
) -> Result<Redirect> {
    LibraryService::new(state.users())
        .save_rentals(&user, &visitor)
        .await?;

    Ok(Redirect::to("/rent"))
}

/// Costs are whole, non-negative amounts.
fn parse_cost(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<u32>()
        .map(i64::from)
        .map_err(|_| AppError::BadRequest("Invalid cost".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost("15").unwrap(), 15);
        assert_eq!(parse_cost(" 0 ").unwrap(), 0);
    }

    #[test]
    fn test_parse_cost_rejects_garbage() {
        for raw in ["", "-5", "abc", "1.5"] {
            assert!(matches!(parse_cost(raw), Err(AppError::BadRequest(_))), "{raw}");
        }
    }
}
