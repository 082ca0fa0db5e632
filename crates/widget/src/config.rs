//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TABCART_STORE_PATH` - File backing the CLI's store (default: tabcart-storage.json)
//! - `TABCART_STORAGE_KEY` - Key the cart is stored under (default: carrinho)
//! - `TABCART_CURRENCY` - Display currency, `BRL`, `USD` or `EUR` (default: BRL)

use std::path::PathBuf;

use tabcart_core::CurrencyCode;
use thiserror::Error;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "carrinho";

/// Store file used when none is configured.
pub const DEFAULT_STORE_PATH: &str = "tabcart-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Key the serialized cart lives under in the store
    pub storage_key: String,
    /// Currency used for subtotals and totals
    pub currency: CurrencyCode,
    /// Path of the file-backed store
    pub store_path: PathBuf,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_key = match lookup("TABCART_STORAGE_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "TABCART_STORAGE_KEY".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let currency = lookup("TABCART_CURRENCY")
            .map(|value| value.parse::<CurrencyCode>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("TABCART_CURRENCY".to_string(), e))?
            .unwrap_or(defaults.currency);

        let store_path = lookup("TABCART_STORE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or(defaults.store_path, PathBuf::from);

        Ok(Self {
            storage_key,
            currency,
            store_path,
        })
    }
}
