//! Cart state management over an injected store.
//!
//! [`CartService`] owns a [`CartStore`] and the key the cart is kept under.
//! Every mutation loads the stored cart, changes it, and writes it back in
//! one synchronous call; nothing is cached between calls, so the store is
//! always the source of truth.

use tabcart_core::{Cart, CartError, LineChange, LineItem, ProductName, Quantity, UnitPrice};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::{DEFAULT_STORAGE_KEY, WidgetConfig};
use crate::error::Result;
use crate::store::CartStore;

/// Counters shown next to the cart after a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Number of distinct lines (what the cart badge shows).
    pub line_count: usize,
    /// Sum of all quantities.
    pub total_quantity: u64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        Self {
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
        }
    }
}

/// Result of adding a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// The product's validated name.
    pub name: ProductName,
    /// Its quantity after the addition.
    pub quantity: Quantity,
    /// Cart counters after the save.
    pub summary: CartSummary,
}

/// Reads, mutates, and persists the cart.
#[derive(Debug, Clone)]
pub struct CartService<S> {
    store: S,
    storage_key: String,
}

impl<S: CartStore> CartService<S> {
    /// A service over `store` using the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// A service over `store` using `storage_key`.
    pub fn with_key(store: S, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
        }
    }

    /// A service over `store` configured from `config`.
    pub fn from_config(store: S, config: &WidgetConfig) -> Self {
        Self::with_key(store, config.storage_key.clone())
    }

    /// The key the cart is stored under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Read the stored cart.
    ///
    /// Never fails: an absent value, a `null`, an unreadable store, or a
    /// value that is not a JSON array all read as an empty cart. Inside the
    /// array, a line that does not read as a [`LineItem`] is dropped on its
    /// own and the others are kept. Lines repeated under the same name are
    /// merged.
    #[instrument(skip(self), fields(key = %self.storage_key))]
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored cart");
                return Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, treating as empty");
                return Cart::new();
            }
        };

        let lines = match serde_json::from_str::<Option<Vec<Value>>>(&raw) {
            Ok(lines) => lines.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Stored cart is malformed, treating as empty");
                return Cart::new();
            }
        };

        let cart: Cart = lines
            .into_iter()
            .enumerate()
            .filter_map(|(position, line)| match serde_json::from_value::<LineItem>(line) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(position, error = %e, "Dropping unreadable cart line");
                    None
                }
            })
            .collect();
        debug!(lines = cart.len(), "Loaded cart");
        cart
    }

    /// Replace the stored cart with `cart`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or the store
    /// rejects the write.
    #[instrument(skip(self, cart), fields(key = %self.storage_key, lines = cart.len()))]
    pub fn save(&mut self, cart: &Cart) -> Result<CartSummary> {
        let json = serde_json::to_string(cart)?;
        self.store.set(&self.storage_key, &json)?;
        debug!("Saved cart");
        Ok(CartSummary::from(cart))
    }

    /// Add one unit of a product described by raw markup attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or price does not parse (the stored cart
    /// is left untouched) or the save fails.
    pub fn add_product(&mut self, name: &str, price: &str) -> Result<Added> {
        let name = ProductName::parse(name)?;
        let price = UnitPrice::parse(price)?;
        self.add(name, price)
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails.
    #[instrument(skip(self, name), fields(key = %self.storage_key, name = %name))]
    pub fn add(&mut self, name: ProductName, price: UnitPrice) -> Result<Added> {
        let mut cart = self.load();
        let quantity = cart.add(name.clone(), price);
        let summary = self.save(&cart)?;
        info!(quantity = quantity.get(), "Added product to cart");
        Ok(Added {
            name,
            quantity,
            summary,
        })
    }

    /// Add one unit to the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such line or the save fails.
    pub fn increase_at(&mut self, index: usize) -> Result<Quantity> {
        self.mutate(|cart| cart.increase_at(index))
    }

    /// Take one unit from the line at `index`, removing it at one.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such line or the save fails.
    pub fn decrease_at(&mut self, index: usize) -> Result<LineChange> {
        self.mutate(|cart| cart.decrease_at(index))
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such line or the save fails.
    pub fn remove_at(&mut self, index: usize) -> Result<LineItem> {
        self.mutate(|cart| cart.remove_at(index))
    }

    /// Add one unit to the line for `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no line has that name or the save fails.
    pub fn increase(&mut self, name: &str) -> Result<Quantity> {
        self.mutate(|cart| cart.increase(name))
    }

    /// Take one unit from the line for `name`, removing it at one.
    ///
    /// # Errors
    ///
    /// Returns an error if no line has that name or the save fails.
    pub fn decrease(&mut self, name: &str) -> Result<LineChange> {
        self.mutate(|cart| cart.decrease(name))
    }

    /// Remove the line for `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no line has that name or the save fails.
    pub fn remove(&mut self, name: &str) -> Result<LineItem> {
        self.mutate(|cart| cart.remove(name))
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails.
    #[instrument(skip(self), fields(key = %self.storage_key))]
    pub fn clear(&mut self) -> Result<CartSummary> {
        let summary = self.save(&Cart::new())?;
        info!("Cleared cart");
        Ok(summary)
    }

    /// Load and save again, rewriting the stored value in canonical form.
    ///
    /// A malformed value is replaced by an empty cart, unreadable lines are
    /// dropped, and duplicate lines are merged.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails.
    pub fn normalize(&mut self) -> Result<CartSummary> {
        let cart = self.load();
        self.save(&cart)
    }

    /// Load, apply `f`, and save only if `f` succeeded.
    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut Cart) -> std::result::Result<T, CartError>,
    ) -> Result<T> {
        let mut cart = self.load();
        let out = f(&mut cart)?;
        self.save(&cart)?;
        Ok(out)
    }
}
