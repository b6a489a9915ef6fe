//! Core types for Nepali Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartState, CartStateError, LineItem, LineItemError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{Category, Product};
