//! The shopping cart and its mutation rules.
//!
//! The cart is an ordered list of lines, one per distinct product id, in
//! first-add order. Derived values (`total`, `item_count`) are recomputed on
//! every read so they can never go stale after a mutation.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One cart line: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product, copied by value when first added.
    pub product: Product,
    /// Quantity, always at least 1 while the line exists.
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// An in-progress selection of products and quantities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// If a line for the same product id exists its quantity is incremented,
    /// otherwise a new line with quantity 1 is appended. Lines keep their
    /// first-add order.
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Remove the line for a product id. No-op if there is none.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|i| i.product.id != id);
    }

    /// Replace the quantity of a line.
    ///
    /// Quantities below 1 are rejected silently (removal is an explicit
    /// action, not a consequence of decrementing). Unknown ids are a no-op.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == id) {
            item.quantity = quantity;
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The cart lines, in first-add order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines. Recomputed on every call.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals. Recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_f64(price).unwrap(),
            image: None,
            category: "test".to_string(),
        }
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        cart.add(product(1, 10.0));

        assert_eq!(cart.lines(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Price::from_f64(20.0).unwrap());
    }

    #[test]
    fn test_add_keeps_first_add_order() {
        let mut cart = Cart::new();
        cart.add(product(2, 1.0));
        cart.add(product(1, 1.0));
        cart.add(product(2, 1.0));

        let ids: Vec<i64> = cart.items().iter().map(|i| i.product.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_derived_values_follow_every_mutation() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        cart.add(product(2, 5.0));
        cart.set_quantity(ProductId::new(2), 3);

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), Price::from_f64(25.0).unwrap());

        cart.remove(ProductId::new(1));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_f64(15.0).unwrap());
    }

    #[test]
    fn test_set_quantity_below_one_is_rejected() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));

        cart.set_quantity(ProductId::new(1), 0);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        let before = cart.clone();

        cart.set_quantity(ProductId::new(99), 5);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        let before = cart.clone();

        cart.remove(ProductId::new(99));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.total().to_string(), "$0.00");
    }

    #[test]
    fn test_cart_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add(product(1, 19.99));
        cart.add(product(1, 19.99));
        cart.add(product(2, 4.5));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
