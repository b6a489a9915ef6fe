//! Nepali Shop Core - Shared types library.
//!
//! This crate provides the domain types used across all Nepali Shop components:
//! - `cart` - The cart store, its storage/catalog/feedback ports and view model
//! - `cli` - Terminal host that drives the cart store
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage access, no logging. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, catalog products, line items and cart state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
