//! Per-visitor shop state and its transition functions.
//!
//! All interactive state lives in one explicit struct mutated through named
//! transitions, so every flow the storefront exposes can be exercised in a
//! plain unit test.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Which flow a completed mock payment belonged to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentMode {
    /// A buy-now purchase of a single product.
    SingleItem {
        /// The purchased product.
        product: Product,
    },
    /// A whole-cart checkout.
    Cart {
        /// Number of distinct cart lines that were paid for.
        lines: usize,
    },
}

/// Outcome of a confirmed mock payment.
///
/// No gateway is contacted; the receipt is a local acknowledgment only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Amount "charged".
    pub amount: Price,
    /// Which flow produced the receipt.
    pub mode: PaymentMode,
}

/// Interactive state for one visitor.
///
/// Everything here is ephemeral session data: the cart, the product currently
/// opened in the detail view, the cart drawer and payment modal visibility,
/// and the pending buy-now product (absent means a whole-cart checkout).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSession {
    /// The visitor's cart.
    pub cart: Cart,
    /// Product currently shown in the detail view, if any.
    pub selected: Option<ProductId>,
    /// Whether the cart drawer is open.
    pub cart_open: bool,
    /// Whether the payment modal is open.
    pub payment_open: bool,
    /// Product for a pending single-item purchase; `None` means the payment
    /// modal (if open) is in whole-cart mode.
    pub buy_now: Option<Product>,
}

impl ShopSession {
    /// Open a product in the detail view.
    pub const fn view_product(&mut self, id: ProductId) {
        self.selected = Some(id);
    }

    /// Return to the listing.
    pub const fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Open the cart drawer.
    pub const fn open_cart(&mut self) {
        self.cart_open = true;
    }

    /// Close the cart drawer.
    pub const fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Start a single-item purchase: remember the product and open the
    /// payment modal.
    pub fn buy_now(&mut self, product: Product) {
        self.buy_now = Some(product);
        self.payment_open = true;
    }

    /// Start a whole-cart checkout: open the payment modal with no pending
    /// single item.
    pub fn begin_checkout(&mut self) {
        self.buy_now = None;
        self.payment_open = true;
    }

    /// Close the payment modal without paying. A pending buy-now product
    /// stays pending until the next purchase starts or completes.
    pub const fn close_payment(&mut self) {
        self.payment_open = false;
    }

    /// Complete the mock payment and return its receipt.
    ///
    /// In single-item mode the receipt covers the pending product's price and
    /// the product is recorded in the cart. In cart mode the receipt covers
    /// the cart total, the cart is emptied, and the cart drawer closes along
    /// with the modal.
    pub fn confirm_payment(&mut self) -> PaymentReceipt {
        self.payment_open = false;

        match self.buy_now.take() {
            Some(product) => {
                let receipt = PaymentReceipt {
                    amount: product.price,
                    mode: PaymentMode::SingleItem {
                        product: product.clone(),
                    },
                };
                self.record_purchase(product);
                receipt
            }
            None => {
                let receipt = PaymentReceipt {
                    amount: self.cart.total(),
                    mode: PaymentMode::Cart {
                        lines: self.cart.lines(),
                    },
                };
                self.cart.clear();
                self.cart_open = false;
                receipt
            }
        }
    }

    // TODO: confirm with the product owner whether a buy-now purchase should
    // also land in the cart; until then the behavior lives in this one place.
    fn record_purchase(&mut self, product: Product) {
        self.cart.add(product);
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
    fn test_selection_round_trip() {
        let mut shop = ShopSession::default();
        shop.view_product(ProductId::new(1));
        assert_eq!(shop.selected, Some(ProductId::new(1)));

        shop.clear_selection();
        assert_eq!(shop.selected, None);
    }

    #[test]
    fn test_buy_now_opens_modal_with_pending_product() {
        let mut shop = ShopSession::default();
        shop.buy_now(product(1, 10.0));

        assert!(shop.payment_open);
        assert_eq!(shop.buy_now.as_ref().unwrap().id, ProductId::new(1));
    }

    #[test]
    fn test_begin_checkout_clears_pending_product() {
        let mut shop = ShopSession::default();
        shop.buy_now(product(1, 10.0));
        shop.close_payment();

        shop.begin_checkout();
        assert!(shop.payment_open);
        assert_eq!(shop.buy_now, None);
    }

    #[test]
    fn test_confirm_single_item_adds_purchase_to_cart() {
        let mut shop = ShopSession::default();
        shop.buy_now(product(1, 10.0));

        let receipt = shop.confirm_payment();

        assert_eq!(receipt.amount, Price::from_f64(10.0).unwrap());
        assert!(matches!(receipt.mode, PaymentMode::SingleItem { .. }));
        assert!(!shop.payment_open);
        assert_eq!(shop.buy_now, None);
        assert_eq!(shop.cart.item_count(), 1);
        assert_eq!(
            shop.cart.items()[0].product.id,
            ProductId::new(1),
            "purchased product is recorded in the cart"
        );
    }

    #[test]
    fn test_confirm_cart_mode_empties_cart_and_closes_drawer() {
        let mut shop = ShopSession::default();
        shop.cart.add(product(1, 10.0));
        shop.cart.add(product(1, 10.0));
        shop.cart.add(product(2, 5.0));
        shop.open_cart();
        shop.begin_checkout();

        let receipt = shop.confirm_payment();

        assert_eq!(receipt.amount, Price::from_f64(25.0).unwrap());
        assert_eq!(receipt.mode, PaymentMode::Cart { lines: 2 });
        assert!(shop.cart.is_empty());
        assert!(!shop.payment_open);
        assert!(!shop.cart_open);
    }

    #[test]
    fn test_confirm_empty_cart_checkout_is_harmless() {
        let mut shop = ShopSession::default();
        shop.begin_checkout();

        let receipt = shop.confirm_payment();
        assert_eq!(receipt.amount, Price::ZERO);
        assert_eq!(receipt.mode, PaymentMode::Cart { lines: 0 });
        assert!(shop.cart.is_empty());
    }

    #[test]
    fn test_cancel_keeps_pending_buy_now() {
        let mut shop = ShopSession::default();
        shop.buy_now(product(1, 10.0));
        shop.close_payment();

        assert!(!shop.payment_open);
        assert!(shop.buy_now.is_some());
    }

    #[test]
    fn test_session_serde_round_trip() {
        let mut shop = ShopSession::default();
        shop.cart.add(product(1, 19.99));
        shop.view_product(ProductId::new(1));
        shop.open_cart();

        let json = serde_json::to_string(&shop).unwrap();
        let back: ShopSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shop);
    }
}
