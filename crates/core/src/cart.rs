//! The visitor's cart.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s, at most one per product id,
//! kept in the order products were first added. All operations are total:
//! adding never fails and removing a position that does not exist changes
//! nothing.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A product selected by the visitor, with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price at the time the product was first added.
    pub price: Price,
    pub image: Option<String>,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Ordered, distinct-by-id collection of cart items.
///
/// # Example
///
/// ```rust
/// use almacency_core::{Cart, Price, Product};
///
/// let bread = Product::new("a", "Bread", "", Price::parse("100").unwrap());
///
/// let mut cart = Cart::new();
/// cart.add(&bread);
/// cart.add(&bread);
///
/// assert_eq!(cart.item_count(), 1);
/// assert_eq!(cart.total().to_string(), "$ 200,00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
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

    /// Add one unit of `product`.
    ///
    /// Increments the quantity of the existing line for `product.id`, or
    /// appends a new line with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem::from_product(product));
        }
    }

    /// Remove the line at `index`.
    ///
    /// Returns the removed item, or `None` (leaving the cart untouched) when
    /// `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove the line for `id`, if present.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        self.remove_at(index)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of distinct lines, not the summed quantities.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, title: &str, price: &str) -> Product {
        Product::new(id, title, "", Price::parse(price).unwrap())
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(&product("a", "Bread", "100"));
        cart.add(&product("b", "Milk", "250.50"));
        cart.add(&product("c", "Yerba", "1999"));
        cart
    }

    #[test]
    fn test_add_new_product_appends_with_quantity_one() {
        let mut cart = sample_cart();
        let before = cart.item_count();

        cart.add(&product("d", "Dulce de leche", "800"));

        assert_eq!(cart.item_count(), before + 1);
        let last = cart.items().last().unwrap();
        assert_eq!(last.id, ProductId::new("d"));
        assert_eq!(last.quantity, 1);
    }

    #[test]
    fn test_add_existing_product_increments_only_that_line() {
        let mut cart = sample_cart();
        let before = cart.clone();

        cart.add(&product("b", "Milk", "250.50"));

        assert_eq!(cart.item_count(), before.item_count());
        for (after, before) in cart.items().iter().zip(before.items()) {
            assert_eq!(after.id, before.id);
            if after.id.as_str() == "b" {
                assert_eq!(after.quantity, before.quantity + 1);
            } else {
                assert_eq!(after.quantity, before.quantity);
            }
        }
    }

    #[test]
    fn test_add_twice_to_empty_cart_yields_single_line() {
        let bread = product("a", "Bread", "100");
        let mut cart = Cart::new();

        cart.add(&bread);
        cart.add(&bread);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items().first().unwrap().quantity, 2);
    }

    #[test]
    fn test_add_keeps_price_of_first_add() {
        let mut cart = Cart::new();
        cart.add(&product("a", "Bread", "100"));
        cart.add(&product("a", "Bread", "120"));

        let item = cart.get(&ProductId::new("a")).unwrap();
        assert_eq!(item.price.amount(), Decimal::from(100));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_total_is_sum_of_price_times_quantity() {
        let mut cart = sample_cart();
        cart.add(&product("a", "Bread", "100"));

        // 2 * 100 + 250.50 + 1999
        assert_eq!(cart.total().amount(), Decimal::new(244_950, 2));
    }

    #[test]
    fn test_total_of_empty_cart_is_zero() {
        assert!(Cart::new().total().is_zero());
    }

    #[test]
    fn test_item_count_counts_lines_not_units() {
        let mut cart = sample_cart();
        cart.add(&product("a", "Bread", "100"));
        cart.add(&product("a", "Bread", "100"));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_remove_at_valid_index_preserves_others() {
        let mut cart = sample_cart();

        let removed = cart.remove_at(1).unwrap();

        assert_eq!(removed.id, ProductId::new("b"));
        assert_eq!(cart.item_count(), 2);
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut cart = sample_cart();
        let before = cart.clone();

        assert!(cart.remove_at(3).is_none());
        assert!(cart.remove_at(usize::MAX).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_only_item_empties_cart() {
        let mut cart = Cart::new();
        cart.add(&product("a", "Bread", "100"));

        cart.remove_at(0);

        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_remove_by_id() {
        let mut cart = sample_cart();

        assert!(cart.remove(&ProductId::new("c")).is_some());
        assert!(cart.remove(&ProductId::new("missing")).is_none());
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut cart = sample_cart();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serde_preserves_order_and_quantities() {
        let mut cart = sample_cart();
        cart.add(&product("c", "Yerba", "1999"));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, cart);
    }
}
