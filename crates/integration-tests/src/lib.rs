//! Integration tests for tabcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tabcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - End-to-end shopper flows through the controller
//! - `storage_compat` - Reading and writing the stored cart layout
//!
//! The helpers below build controllers over fresh stores so each test starts
//! from an empty cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tabcart_core::CurrencyCode;
use tabcart_widget::{CartController, CartEvent, CartService, CartStore, MemoryStore};

/// A BRL controller over an empty in-memory store.
#[must_use]
pub fn memory_controller() -> CartController<MemoryStore> {
    controller_over(MemoryStore::new())
}

/// A BRL controller over `store`.
pub fn controller_over<S: CartStore>(store: S) -> CartController<S> {
    CartController::new(CartService::new(store), CurrencyCode::BRL)
}

/// The event an add-to-cart control with these data attributes fires.
#[must_use]
pub fn add_to_cart(name: &str, price: &str) -> CartEvent {
    CartEvent::AddToCart {
        name: name.to_owned(),
        price: price.to_owned(),
    }
}
