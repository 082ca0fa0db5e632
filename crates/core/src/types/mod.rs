//! Core types for tabcart.
//!
//! This module provides type-safe wrappers for the line item's fields.

pub mod line_item;
pub mod name;
pub mod price;
pub mod quantity;

pub use line_item::LineItem;
pub use name::{NameError, ProductName};
pub use price::{CurrencyCode, Money, PriceError, UnitPrice};
pub use quantity::Quantity;
