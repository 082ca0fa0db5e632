//! tabcart Core - Shared cart types.
//!
//! This crate provides the domain types used across all tabcart components:
//! - `widget` - Cart store, renderers, and event controller
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage access, no rendering. This keeps it lightweight and allows it to
//! be used anywhere, including `wasm32` builds.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product names, quantities, and prices
//! - [`cart`] - The line-item collection and its mutations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, LineChange};
pub use types::*;
