//! Cart line items and the ordered cart collection.

use la_reyna_core::Price;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building a [`CartLineItem`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// Line items need a product name.
    #[error("line item name cannot be empty")]
    EmptyName,
}

/// Largest quantity a single line can hold. Larger requests are clamped.
pub const MAX_QUANTITY: u32 = 999;

/// Identity of a line item within a cart: product name plus volume label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub name: &'a str,
    pub volume: Option<&'a str>,
}

/// One product entry in the cart.
///
/// Stored as camelCase JSON (`discountedPrice`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Image URL shown next to the line.
    pub image: String,
    /// Product title as shown on the detail page.
    pub name: String,
    /// Volume label (e.g. `50.00ml`), when the product has one.
    #[serde(default)]
    pub volume: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Units in the cart; never zero.
    pub quantity: u32,
    /// Per-line discounted price. Carried for compatibility; nothing sets it.
    #[serde(default)]
    pub discounted_price: Option<Price>,
}

impl CartLineItem {
    /// Build a line item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` for a zero quantity and
    /// `CartError::EmptyName` for a blank name. Quantities above
    /// [`MAX_QUANTITY`] are clamped.
    pub fn new(
        image: impl Into<String>,
        name: impl Into<String>,
        volume: Option<String>,
        price: Price,
        quantity: u32,
    ) -> Result<Self, CartError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CartError::EmptyName);
        }
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        Ok(Self {
            image: image.into(),
            name,
            volume,
            price,
            quantity: quantity.min(MAX_QUANTITY),
            discounted_price: None,
        })
    }

    /// The merge key for this line.
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            name: &self.name,
            volume: self.volume.as_deref(),
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Ordered list of line items with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    /// `Σ price × quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Add `item`, merging into an existing line with the same key.
    ///
    /// On a merge the existing line keeps its image and price; only the
    /// quantity grows, up to [`MAX_QUANTITY`].
    pub fn add(&mut self, item: CartLineItem) {
        let key = item.key();
        if let Some(existing) = self.items.iter_mut().find(|line| line.key() == key) {
            existing.quantity = existing
                .quantity
                .saturating_add(item.quantity)
                .min(MAX_QUANTITY);
        } else {
            self.items.push(item);
        }
    }

    /// Remove the line at `index`. Out-of-range indices return `None`.
    pub fn remove(&mut self, index: usize) -> Option<CartLineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Set the quantity of the line at `index`.
    ///
    /// A zero quantity or an out-of-range index changes nothing and
    /// returns `false`. Quantities above [`MAX_QUANTITY`] are clamped.
    pub fn update_quantity(&mut self, index: usize, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.items.get_mut(index) {
            Some(item) => {
                item.quantity = quantity.min(MAX_QUANTITY);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(name: &str, volume: Option<&str>, soles: i64, quantity: u32) -> CartLineItem {
        CartLineItem::new(
            "/static/img/prod-frag1.png",
            name,
            volume.map(String::from),
            Price::from_soles(soles),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_zero_quantity() {
        let result = CartLineItem::new("", "Cielo", None, Price::from_soles(1), 0);
        assert_eq!(result, Err(CartError::ZeroQuantity));
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let result = CartLineItem::new("", "  ", None, Price::from_soles(1), 1);
        assert_eq!(result, Err(CartError::EmptyName));
    }

    #[test]
    fn test_add_merges_same_name_and_volume() {
        let mut cart = Cart::new();
        cart.add(item("Cielo en Rosa", Some("50.00ml"), 113, 1));
        cart.add(item("Cielo en Rosa", Some("50.00ml"), 113, 2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_keeps_different_volumes_apart() {
        let mut cart = Cart::new();
        cart.add(item("Ccori Rosé", Some("75.00ml"), 119, 1));
        cart.add(item("Ccori Rosé", Some("150.00ml"), 119, 1));
        cart.add(item("Ccori Rosé", None, 119, 1));

        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_merge_keeps_original_price() {
        let mut cart = Cart::new();
        cart.add(item("Bombshell", None, 180, 1));
        cart.add(item("Bombshell", None, 999, 1));

        assert_eq!(cart.items()[0].price, Price::from_soles(180));
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_by_position() {
        let mut cart = Cart::from(vec![
            item("A", None, 10, 1),
            item("B", None, 20, 1),
            item("C", None, 30, 1),
        ]);

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.name, "B");
        let names: Vec<_> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = Cart::from(vec![item("A", None, 10, 1)]);
        assert!(cart.remove(5).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_is_ignored() {
        let mut cart = Cart::from(vec![item("A", None, 10, 2)]);
        let before = cart.clone();

        assert!(!cart.update_quantity(0, 0));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::from(vec![item("A", None, 10, 2)]);
        assert!(cart.update_quantity(0, 7));
        assert_eq!(cart.items()[0].quantity, 7);
        assert!(!cart.update_quantity(3, 7));
    }

    #[test]
    fn test_count_and_subtotal() {
        let cart = Cart::from(vec![item("A", None, 50, 2), item("B", None, 30, 1)]);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.subtotal(), Price::from_soles(130));
    }

    #[test]
    fn test_quantities_are_clamped_per_line() {
        let mut cart = Cart::from(vec![item("A", None, 10, u32::MAX)]);
        assert_eq!(cart.items()[0].quantity, MAX_QUANTITY);

        cart.add(item("A", None, 10, 5));
        assert_eq!(cart.items()[0].quantity, MAX_QUANTITY);

        cart.add(item("B", None, 10, 1));
        assert!(cart.update_quantity(1, u32::MAX));
        assert_eq!(cart.items()[1].quantity, MAX_QUANTITY);
        assert_eq!(cart.count(), 2 * MAX_QUANTITY);
    }

    #[test]
    fn test_count_saturates_on_stored_quantities() {
        // Carts read back from the session skip the constructor
        let mut json = serde_json::to_value(Cart::from(vec![
            item("A", None, 10, 1),
            item("B", None, 10, 1),
        ]))
        .unwrap();
        json[0]["quantity"] = u32::MAX.into();
        json[1]["quantity"] = u32::MAX.into();

        let cart: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(cart.count(), u32::MAX);
    }

    #[test]
    fn test_json_shape() {
        let cart = Cart::from(vec![item("A", Some("50ml"), 10, 1)]);
        let json = serde_json::to_value(&cart).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["name"], "A");
        assert_eq!(json[0]["volume"], "50ml");
        assert!(json[0]["discountedPrice"].is_null());
    }
}
