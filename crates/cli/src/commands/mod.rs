//! CLI command implementations.

pub mod cart;

use std::io;

use tabcart_core::CurrencyCode;
use tabcart_widget::{CartService, FileStore, WidgetConfig, WidgetError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart operation failed.
    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    /// Exporting the cart failed.
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    /// The command line did not pick a cart line.
    #[error(transparent)]
    Usage(#[from] clap::Error),
}

/// Everything a command needs: the cart service over the configured file
/// store and the display currency.
pub struct Session {
    pub service: CartService<FileStore>,
    pub currency: CurrencyCode,
}

impl Session {
    /// Open the store described by `config`.
    #[must_use]
    pub fn open(config: &WidgetConfig) -> Self {
        tracing::debug!(
            path = %config.store_path.display(),
            key = %config.storage_key,
            "Opening cart store"
        );
        Self {
            service: CartService::from_config(FileStore::new(&config.store_path), config),
            currency: config.currency,
        }
    }
}
