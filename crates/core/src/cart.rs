//! The cart collection: an insertion-ordered list of line items.
//!
//! Everything here is pure in-memory manipulation. Loading and saving is the
//! widget crate's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::{LineItem, ProductName, Quantity, UnitPrice};

/// Errors from cart mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A positional operation addressed a line that does not exist.
    #[error("no cart line at position {index} (cart has {len} lines)")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of lines in the cart.
        len: usize,
    },
    /// A name-keyed operation addressed a product that is not in the cart.
    #[error("{0} is not in the cart")]
    NotInCart(String),
}

/// What a quantity change did to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// The line is still present with this quantity.
    Quantity(Quantity),
    /// The line was removed.
    Removed,
}

/// An ordered collection of line items, unique by name.
///
/// Serializes as a bare JSON array of line items. Deserializing merges lines
/// repeated under one name, like [`FromIterator`] does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of quantity times unit price over all lines, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::subtotal)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::MAX)
    }

    /// Position of the line for `name`, if present.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == *name)
    }

    /// The line for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == *name)
    }

    /// Add one unit of a product.
    ///
    /// If a line with the same name exists its quantity goes up by one and
    /// its stored unit price is kept; otherwise a new line is appended.
    /// Returns the line's resulting quantity.
    pub fn add(&mut self, name: ProductName, unit_price: UnitPrice) -> Quantity {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity = item.quantity.increment();
            return item.quantity;
        }

        self.items.push(LineItem::new(name, unit_price));
        Quantity::ONE
    }

    /// Add one unit to the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no such line.
    pub fn increase_at(&mut self, index: usize) -> Result<Quantity, CartError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;
        item.quantity = item.quantity.increment();
        Ok(item.quantity)
    }

    /// Take one unit from the line at `index`, removing the line when it
    /// held a single unit.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no such line.
    pub fn decrease_at(&mut self, index: usize) -> Result<LineChange, CartError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;

        if let Some(quantity) = item.quantity.decrement() {
            item.quantity = quantity;
            return Ok(LineChange::Quantity(quantity));
        }

        self.items.remove(index);
        Ok(LineChange::Removed)
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no such line.
    pub fn remove_at(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Add one unit to the line for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if no line has that name.
    pub fn increase(&mut self, name: &str) -> Result<Quantity, CartError> {
        let index = self.require(name)?;
        self.increase_at(index)
    }

    /// Take one unit from the line for `name`, removing it at one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if no line has that name.
    pub fn decrease(&mut self, name: &str) -> Result<LineChange, CartError> {
        let index = self.require(name)?;
        self.decrease_at(index)
    }

    /// Remove the line for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if no line has that name.
    pub fn remove(&mut self, name: &str) -> Result<LineItem, CartError> {
        let index = self.require(name)?;
        self.remove_at(index)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn require(&self, name: &str) -> Result<usize, CartError> {
        self.position(name)
            .ok_or_else(|| CartError::NotInCart(name.to_owned()))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        items.into_iter().collect()
    }
}

impl FromIterator<LineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        let mut cart = Self::new();
        for item in iter {
            match cart.items.iter_mut().find(|line| line.name == item.name) {
                Some(line) => {
                    let merged = line.quantity.get().saturating_add(item.quantity.get());
                    line.quantity = Quantity::new(merged).unwrap_or(line.quantity);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }
}
