//! Core types for the Almacency storefront.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod currency;
pub mod id;
pub mod price;
pub mod product;

pub use currency::{CurrencyFormat, ES_AR, format_currency};
pub use id::ProductId;
pub use price::{Price, PriceError};
pub use product::Product;
