//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Signup and password login
//! - `library` - Wishlist and rental bookkeeping between the session and the store

pub mod auth;
pub mod library;
