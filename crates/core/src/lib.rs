//! Bookrent Core - Domain types and reading-list rules.
//!
//! This crate provides the types shared by all Bookrent components:
//! - `web` - The book search, wishlist and rental site
//! - `cli` - Command-line tools for database migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. Persistence and session handling live in `web`.
//!
//! # Modules
//!
//! - [`types`] - User identifiers, emails, wishlists and rentals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
