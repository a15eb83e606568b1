//! Cart value types.
//!
//! A [`Cart`] is an ordered sequence of [`CartItem`] with at most one item
//! per product ID. Carts are values: the mutation helpers return a new cart
//! rather than editing in place, so a caller always holds either the state
//! before an operation or the state after it, never something in between.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// A product in a cart together with the requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(rename = "image")]
    pub image_url: String,
    /// Requested quantity, always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Create a cart item from a catalog product and a quantity.
    #[must_use]
    pub fn new(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image_url: product.image_url,
            amount,
        }
    }

    /// Line total for this item (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.amount
    }
}

/// An ordered collection of cart items for one shopping session.
///
/// Insertion order is preserved across all operations. Uniqueness per
/// product ID is maintained by the store; [`Cart::added`] expects the
/// product to be absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Look up the item for a product, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the cart contains an item for this product.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// A new cart with `item` appended at the end.
    ///
    /// The caller must have checked that no item with the same product ID
    /// exists; appending a duplicate would break the uniqueness invariant.
    #[must_use]
    pub fn added(&self, item: CartItem) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// A new cart without the item for `id`, remaining order preserved.
    ///
    /// Identical to the current cart when the product is absent.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        }
    }

    /// A new cart with the quantity for `id` replaced, all other fields and
    /// positions unchanged.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id == id {
                        CartItem {
                            amount,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total units across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i32, title: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::new(Decimal::new(price, 2)),
            image_url: format!("https://cdn.example.com/{id}.jpg"),
        }
    }

    #[test]
    fn test_added_preserves_insertion_order() {
        let cart = Cart::new()
            .added(CartItem::new(product(1, "Sneaker", 17990), 1))
            .added(CartItem::new(product(2, "Boot", 25000), 2));

        let ids: Vec<i32> = cart.iter().map(|item| item.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_without_keeps_remaining_order() {
        let cart = Cart::new()
            .added(CartItem::new(product(1, "Sneaker", 17990), 1))
            .added(CartItem::new(product(2, "Boot", 25000), 1))
            .added(CartItem::new(product(3, "Sandal", 9990), 1));

        let cart = cart.without(ProductId::new(2));
        let ids: Vec<i32> = cart.iter().map(|item| item.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_without_absent_id_is_identity() {
        let cart = Cart::new().added(CartItem::new(product(1, "Sneaker", 17990), 1));
        assert_eq!(cart.without(ProductId::new(9)), cart);
    }

    #[test]
    fn test_with_amount_changes_only_the_quantity() {
        let cart = Cart::new()
            .added(CartItem::new(product(1, "Sneaker", 17990), 1))
            .added(CartItem::new(product(2, "Boot", 25000), 3));

        let cart = cart.with_amount(ProductId::new(2), 5);

        let boot = cart.get(ProductId::new(2)).expect("boot present");
        assert_eq!(boot.amount, 5);
        assert_eq!(boot.title, "Boot");
        assert_eq!(cart.get(ProductId::new(1)).expect("sneaker").amount, 1);
    }

    #[test]
    fn test_subtotal_and_total_quantity() {
        let cart = Cart::new()
            .added(CartItem::new(product(1, "Sneaker", 10000), 2))
            .added(CartItem::new(product(2, "Boot", 5050), 1));

        assert_eq!(cart.subtotal().amount(), Decimal::new(25050, 2));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_cart_serde_is_a_plain_item_array() {
        let cart = Cart::new().added(CartItem::new(product(1, "Sneaker", 17990), 2));
        let json = serde_json::to_string(&cart).expect("serialize cart");
        assert!(json.starts_with('['));

        let restored: Cart = serde_json::from_str(&json).expect("parse cart");
        assert_eq!(restored, cart);
    }
}
