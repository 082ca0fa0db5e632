//! Unified error handling for the widget.
//!
//! Every fallible widget operation returns `Result<T, WidgetError>`. Reads of
//! the stored cart are the exception: they degrade to an empty cart instead
//! of failing.

use tabcart_core::{CartError, NameError, PriceError};
use thiserror::Error;

use crate::store::StoreError;

/// Widget-level error type.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// A quantity or removal addressed a line that is not there.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The product name from the add-to-cart control is unusable.
    #[error("Invalid product name: {0}")]
    Name(#[from] NameError),

    /// The price from the add-to-cart control is unusable.
    #[error("Invalid product price: {0}")]
    Price(#[from] PriceError),

    /// The cart could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl WidgetError {
    /// Whether the error was caused by the input rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Cart(_) | Self::Name(_) | Self::Price(_))
    }
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;
