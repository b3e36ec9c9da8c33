//! Book search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::BookSummary;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
}

/// Search results template.
#[derive(Template, WebTemplate)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub current_user: Option<CurrentUser>,
    pub search_term: String,
    pub books: Vec<BookSummary>,
}

/// Run a catalog search and render the hits.
#[instrument(skip_all)]
pub async fn booksearch(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<SearchForm>,
) -> Result<impl IntoResponse> {
    let books = state.catalog().search(&form.search_term).await?;

    Ok(ResultsTemplate {
        current_user,
        search_term: form.search_term,
        books,
    })
}
