//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, signed cookie)
//!
//! # Extractors
//!
//! - [`RequireAuth`] / [`RequireAuthStatus`] / [`OptionalAuth`] - logged-in user
//! - [`Visitor`] - the visitor's working wishlist and rentals

pub mod auth;
pub mod request_id;
pub mod session;
pub mod visitor;

pub use auth::{AuthRejection, OptionalAuth, RequireAuth, RequireAuthStatus};
pub use request_id::request_id_middleware;
pub use session::{SESSION_COOKIE_NAME, SessionLayer, create_session_layer};
pub use visitor::Visitor;
