//! Order summary text and the messaging checkout link.
//!
//! Checkout does not submit an order anywhere. It builds a `wa.me` link whose
//! pre-filled text lists the cart, and the visitor sends that message
//! themselves.

use core::fmt::Write as _;

use crate::cart::{Cart, CartItem};
use crate::types::Price;

/// Base of the messaging handoff URI.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Errors that can occur when building a [`CheckoutLink`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutLinkError {
    #[error("checkout phone number cannot be empty")]
    EmptyPhone,
    #[error("checkout phone number must contain only digits: {0:?}")]
    InvalidPhone(String),
}

/// Render the order summary for `items` and `total`.
///
/// One `* <title> - <price>` line per unit, in cart order, a blank line, then
/// `Total: <total>`. An item with quantity 3 is listed three times.
///
/// ```rust
/// use almacency_core::{Cart, Price, Product, build_order_message};
///
/// let mut cart = Cart::new();
/// cart.add(&Product::new("a", "Bread", "", Price::parse("100").unwrap()));
///
/// assert_eq!(
///     build_order_message(cart.items(), cart.total()),
///     "* Bread - $ 100,00\n\nTotal: $ 100,00"
/// );
/// ```
#[must_use]
pub fn build_order_message(items: &[CartItem], total: Price) -> String {
    let mut message = String::new();
    for item in items {
        for _ in 0..item.quantity {
            // Writing to a String cannot fail.
            let _ = writeln!(message, "* {} - {}", item.title, item.price);
        }
    }
    let _ = write!(message, "\nTotal: {total}");
    message
}

/// Percent-encode a summary for use as a URI query value.
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` is escaped, so
/// `urlencoding::decode` returns the exact input.
#[must_use]
pub fn encode_message(message: &str) -> String {
    urlencoding::encode(message).into_owned()
}

/// Builder for the `wa.me` checkout URI of a fixed phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    phone: String,
}

impl CheckoutLink {
    /// Create a link builder for `phone` in international format.
    ///
    /// A leading `+` and surrounding whitespace are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is empty or contains non-digits.
    pub fn new(phone: &str) -> Result<Self, CheckoutLinkError> {
        let trimmed = phone.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(CheckoutLinkError::EmptyPhone);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CheckoutLinkError::InvalidPhone(phone.to_owned()));
        }
        Ok(Self {
            phone: digits.to_owned(),
        })
    }

    /// Phone number digits.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Link carrying an arbitrary pre-filled message.
    #[must_use]
    pub fn url_with_text(&self, message: &str) -> String {
        format!(
            "{WHATSAPP_BASE_URL}/{}?text={}",
            self.phone,
            encode_message(message)
        )
    }

    /// Link carrying the order summary of `cart`.
    #[must_use]
    pub fn url_for(&self, cart: &Cart) -> String {
        self.url_with_text(&build_order_message(cart.items(), cart.total()))
    }
}
