//! tabcart Widget - Shopping cart state, rendering, and event handling.
//!
//! # Architecture
//!
//! - [`store`] - The injected key-value store (`CartStore`) and its backends
//! - [`service`] - Read, mutate, and persist the cart through a store
//! - [`views`] - Askama-rendered cart table, badge, and receipt
//! - [`events`] - Page events, the surface trait, and the controller
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```
//! use tabcart_widget::{CartController, CartEvent, CartService, MemoryStore, PageSnapshot};
//! use tabcart_core::CurrencyCode;
//!
//! let mut controller =
//!     CartController::new(CartService::new(MemoryStore::new()), CurrencyCode::BRL);
//! let mut page = PageSnapshot::cart_page();
//!
//! let add = CartEvent::AddToCart { name: "Book".into(), price: "10.00".into() };
//! controller.dispatch(add.clone(), &mut page).unwrap();
//! controller.dispatch(add, &mut page).unwrap();
//!
//! assert_eq!(page.item_count, Some(1));
//! assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}20,00"));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod events;
pub mod service;
pub mod store;
pub mod views;

pub use config::{ConfigError, WidgetConfig};
pub use error::{Result, WidgetError};
pub use events::{CartController, CartEvent, CartSurface, PageSnapshot, added_notice};
pub use service::{Added, CartService, CartSummary};
#[cfg(feature = "web")]
pub use store::LocalStorage;
pub use store::{CartStore, FileStore, MemoryStore, StoreError};
pub use views::{CartRowView, CartTableView, ReceiptLineView, ReceiptView};
