//! Key-value storage the cart is persisted in.
//!
//! The widget never touches a global store directly; it is handed a
//! [`CartStore`] and reads and writes one key through it. Values are opaque
//! strings, the same contract browser local storage offers.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - In-process map, for tests and embedding
//! - [`FileStore`] - JSON file on disk, used by the CLI
//! - `LocalStorage` - Browser `window.localStorage` (`web` feature)

mod file;
#[cfg(feature = "web")]
mod local;
mod memory;

use thiserror::Error;

pub use file::FileStore;
#[cfg(feature = "web")]
pub use local::LocalStorage;
pub use memory::MemoryStore;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backend is not reachable (e.g., storage disabled in the browser).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store.
pub trait CartStore {
    /// Read the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: CartStore + ?Sized> CartStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: CartStore + ?Sized> CartStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
