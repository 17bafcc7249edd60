//! Per-visitor cart storage.
//!
//! Each visitor's [`Cart`] is kept in their session under [`CART_KEY`]. There
//! is no process-wide cart; handlers load the cart, apply one mutation and
//! save it back within the same request.

use almacency_core::Cart;
use tower_sessions::Session;

use crate::error::Result;

/// Session key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Load the visitor's cart, or an empty one.
///
/// A cart that cannot be read back is logged and replaced with an empty cart
/// rather than failing the page.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(CART_KEY).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to load cart from session: {e}");
            Cart::new()
        }
    }
}

/// Save the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(CART_KEY, cart).await?;
    Ok(())
}
