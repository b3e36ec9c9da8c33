//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                      - Home page (search form)
//! POST /booksearch            - Search the catalog
//! GET  /books                 - Home page (requires auth)
//!
//! # Wishlist (requires auth)
//! GET  /wishlist              - Working wishlist
//! POST /add-to-wishlist       - Add an entry
//! POST /delete-from-wishlist  - Remove an entry by index
//! POST /save-wishlist         - Persist the working wishlist (401 if logged out)
//!
//! # Rentals (requires auth)
//! GET  /rent                  - Persisted rentals and total
//! POST /rent-book             - Rent a book (persisted immediately)
//! POST /save-rented-books     - Persist and clear working rentals (401 if logged out)
//!
//! # Auth
//! GET  /login                 - Login page
//! POST /login                 - Login action
//! GET  /signup                - Signup page
//! POST /signup                - Signup action
//! GET  /logout                - Destroy session
//! GET  /dashboard             - Profile (requires auth)
//! ```

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod rent;
pub mod search;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
}

/// Create the wishlist and rental routes router.
pub fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(wishlist::show))
        .route("/add-to-wishlist", post(wishlist::add))
        .route("/delete-from-wishlist", post(wishlist::delete))
        .route("/save-wishlist", post(wishlist::save))
        .route("/rent", get(rent::show))
        .route("/rent-book", post(rent::rent_book))
        .route("/save-rented-books", post(rent::save_rented_books))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/books", get(home::books))
        .route("/booksearch", post(search::booksearch))
        .merge(auth_routes())
        .merge(library_routes())
}
