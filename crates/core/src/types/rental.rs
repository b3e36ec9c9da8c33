//! Rented books and the per-reader rental cap.

use serde::{Deserialize, Serialize};

/// Most books a reader may hold in one rental list.
pub const MAX_RENTED_BOOKS: usize = 3;

/// A rented book and what it cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentedBook {
    pub title: String,
    pub cost: i64,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalError {
    #[error("You can only rent up to {max} books.")]
    LimitExceeded { max: usize },
}

/// Ordered list of rented books, never longer than [`MAX_RENTED_BOOKS`].
///
/// The total cost is always derived from the entries; it is never tracked
/// separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rentals(Vec<RentedBook>);

impl Rentals {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from stored entries without re-checking the cap.
    #[must_use]
    pub const fn from_books(books: Vec<RentedBook>) -> Self {
        Self(books)
    }

    #[must_use]
    pub fn books(&self) -> &[RentedBook] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.0.len() >= MAX_RENTED_BOOKS
    }

    /// Sum of all entry costs.
    #[must_use]
    pub fn total_cost(&self) -> i64 {
        self.0.iter().map(|book| book.cost).sum()
    }

    /// Append a book.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::LimitExceeded`] when the list already holds
    /// [`MAX_RENTED_BOOKS`] entries; the list is left unchanged.
    pub fn rent(&mut self, title: impl Into<String>, cost: i64) -> Result<(), RentalError> {
        if self.is_full() {
            return Err(RentalError::LimitExceeded {
                max: MAX_RENTED_BOOKS,
            });
        }
        self.0.push(RentedBook {
            title: title.into(),
            cost,
        });
        Ok(())
    }
}
