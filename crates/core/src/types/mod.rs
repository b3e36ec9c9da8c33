//! Core types for Bookrent.

pub mod email;
pub mod id;
pub mod rental;
pub mod wishlist;

pub use email::{Email, EmailError};
pub use id::UserId;
pub use rental::{MAX_RENTED_BOOKS, RentalError, RentedBook, Rentals};
pub use wishlist::{AddOutcome, Wishlist, WishlistItem};
