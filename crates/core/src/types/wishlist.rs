//! Wishlist of books a reader wants to keep track of.

use serde::{Deserialize, Serialize};

/// A single wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub title: String,
    pub url: String,
}

/// Result of [`Wishlist::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An entry with the same title (ignoring case and surrounding
    /// whitespace) already exists.
    Duplicate,
    /// Title or URL was blank after trimming.
    MissingField,
}

/// Ordered list of wishlist entries, unique by case-insensitive title.
///
/// Serializes as a plain JSON array so it can be stored in a session and in
/// the user's persisted record unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(Vec<WishlistItem>);

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a wishlist from stored entries without re-checking uniqueness.
    #[must_use]
    pub const fn from_items(items: Vec<WishlistItem>) -> Self {
        Self(items)
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
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

    /// Whether an entry with this title exists, compared case-insensitively
    /// after trimming.
    #[must_use]
    pub fn contains_title(&self, title: &str) -> bool {
        let wanted = title.trim().to_lowercase();
        self.0
            .iter()
            .any(|item| item.title.trim().to_lowercase() == wanted)
    }

    /// Append an entry with the trimmed title and URL.
    ///
    /// Blank fields and duplicate titles leave the list untouched.
    pub fn add(&mut self, title: &str, url: &str) -> AddOutcome {
        let title = title.trim();
        let url = url.trim();
        if title.is_empty() || url.is_empty() {
            return AddOutcome::MissingField;
        }
        if self.contains_title(title) {
            return AddOutcome::Duplicate;
        }
        self.0.push(WishlistItem {
            title: title.to_owned(),
            url: url.to_owned(),
        });
        AddOutcome::Added
    }

    /// Remove the entry at `index`, shifting later entries down.
    ///
    /// Returns `None` and leaves the list unchanged when out of range.
    pub fn remove(&mut self, index: usize) -> Option<WishlistItem> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }
}

impl<'a> IntoIterator for &'a Wishlist {
    type Item = &'a WishlistItem;
    type IntoIter = std::slice::Iter<'a, WishlistItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn titles(wishlist: &Wishlist) -> Vec<&str> {
        wishlist.items().iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn add_trims_fields() {
        let mut wishlist = Wishlist::new();
        assert_eq!(wishlist.add("  Dune ", " http://x/dune  "), AddOutcome::Added);
        assert_eq!(
            wishlist.items(),
            &[WishlistItem {
                title: "Dune".into(),
                url: "http://x/dune".into(),
            }]
        );
    }

    #[test]
    fn add_rejects_case_insensitive_duplicate() {
        let mut wishlist = Wishlist::new();
        wishlist.add("Dune", "http://x/1");
        assert_eq!(wishlist.add("  dUNE", "http://x/2"), AddOutcome::Duplicate);
        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist.items()[0].url, "http://x/1");
    }

    #[test]
    fn add_ignores_blank_fields() {
        let mut wishlist = Wishlist::new();
        assert_eq!(wishlist.add("   ", "http://x"), AddOutcome::MissingField);
        assert_eq!(wishlist.add("Dune", ""), AddOutcome::MissingField);
        assert!(wishlist.is_empty());
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut wishlist = Wishlist::new();
        wishlist.add("A", "u");
        wishlist.add("B", "u");
        wishlist.add("C", "u");

        let removed = wishlist.remove(1).unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(titles(&wishlist), ["A", "C"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut wishlist = Wishlist::new();
        wishlist.add("A", "u");
        assert!(wishlist.remove(1).is_none());
        assert!(wishlist.remove(usize::MAX).is_none());
        assert_eq!(titles(&wishlist), ["A"]);
    }

    #[test]
    fn serializes_as_array_of_objects() {
        let mut wishlist = Wishlist::new();
        wishlist.add("Dune", "http://x");
        let json = serde_json::to_value(&wishlist).unwrap();
        assert_eq!(json, serde_json::json!([{ "title": "Dune", "url": "http://x" }]));

        let back: Wishlist = serde_json::from_value(json).unwrap();
        assert_eq!(back, wishlist);
    }
}
