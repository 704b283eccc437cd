//! Wishlist membership.

use serde::Serialize;
use showroom_core::ProductId;

/// What a [`Wishlist::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    Added,
    Removed,
}

/// A set of product ids, iterated in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    ///
    /// Toggling the same id twice restores the original membership.
    pub fn toggle(&mut self, product_id: ProductId) -> WishlistChange {
        if let Some(index) = self.ids.iter().position(|id| *id == product_id) {
            self.ids.remove(index);
            WishlistChange::Removed
        } else {
            self.ids.push(product_id);
            WishlistChange::Added
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.ids.contains(&product_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist = Wishlist::new();
        let id = ProductId::new(3);
        assert_eq!(wishlist.toggle(id), WishlistChange::Added);
        assert!(wishlist.contains(id));
        assert_eq!(wishlist.toggle(id), WishlistChange::Removed);
        assert!(!wishlist.contains(id));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new(1));
        wishlist.toggle(ProductId::new(2));
        let before = wishlist.clone();

        for id in [1, 2, 3] {
            wishlist.toggle(ProductId::new(id));
            wishlist.toggle(ProductId::new(id));
            let mut now: Vec<_> = wishlist.iter().collect();
            let mut was: Vec<_> = before.iter().collect();
            now.sort();
            was.sort();
            assert_eq!(now, was);
        }
    }

    #[test]
    fn test_no_duplicates() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new(1));
        wishlist.toggle(ProductId::new(2));
        wishlist.toggle(ProductId::new(1));
        wishlist.toggle(ProductId::new(1));
        assert_eq!(wishlist.len(), 2);
        assert_eq!(
            wishlist.iter().collect::<Vec<_>>(),
            vec![ProductId::new(2), ProductId::new(1)]
        );
    }
}
