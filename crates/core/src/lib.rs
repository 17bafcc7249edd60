//! Almacency Core - Shared storefront types.
//!
//! This crate is shared by:
//! - `storefront` - Public catalog page, cart and checkout handoff
//! - `integration-tests` - End-to-end checks against a local catalog feed
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session handling. Every operation here is synchronous and
//! total over well-formed input.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices and currency formatting
//! - [`cart`] - The cart reducer (add, remove, totals)
//! - [`order`] - Order summary text and the messaging checkout link

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod types;

pub use cart::{Cart, CartItem};
pub use order::{CheckoutLink, CheckoutLinkError, build_order_message, encode_message};
pub use types::*;
