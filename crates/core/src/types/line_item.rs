//! A single product entry in the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ProductName, Quantity, UnitPrice};

/// One product entry: name, quantity, and unit price.
///
/// Field names on the wire (`nome`, `qtd`, `preco`) match the layout
/// existing carts were stored with, so those carts keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name; the line's identity within a cart.
    #[serde(rename = "nome")]
    pub name: ProductName,
    /// Number of units.
    #[serde(rename = "qtd")]
    pub quantity: Quantity,
    /// Price of one unit.
    #[serde(rename = "preco")]
    pub unit_price: UnitPrice,
}

impl LineItem {
    /// A new line holding a single unit.
    #[must_use]
    pub const fn new(name: ProductName, unit_price: UnitPrice) -> Self {
        Self {
            name,
            quantity: Quantity::ONE,
            unit_price,
        }
    }

    /// Quantity times unit price, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price
            .amount()
            .checked_mul(Decimal::from(self.quantity.get()))
            .unwrap_or(Decimal::MAX)
    }
}
