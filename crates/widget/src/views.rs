//! Cart table and receipt rendering.
//!
//! View structs carry pre-formatted strings so templates stay free of
//! currency logic. HTML templates are escaped by askama; the `.txt`
//! renditions are for terminals.

use askama::Template;
use chrono::{DateTime, Utc};
use tabcart_core::{Cart, CurrencyCode, LineItem, Money};

use crate::error::Result;

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    /// Zero-based position in the cart.
    pub position: usize,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// The cart table: rows, formatted total, and badge count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTableView {
    pub rows: Vec<CartRowView>,
    pub total: String,
    /// Distinct lines, as shown in the cart badge.
    pub item_count: usize,
}

impl CartTableView {
    /// Build the table for `cart`, formatting amounts in `currency`.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            rows: cart
                .items()
                .iter()
                .enumerate()
                .map(|(position, item)| CartRowView::new(position, item, currency))
                .collect(),
            total: Money::new(cart.total(), currency).to_string(),
            item_count: cart.len(),
        }
    }

    /// An empty table.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            rows: Vec::new(),
            total: Money::zero(currency).to_string(),
            item_count: 0,
        }
    }

    /// The table body (`<tr>` rows) as HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_rows(&self) -> Result<String> {
        Ok(CartRowsHtml { table: self }.render()?)
    }

    /// The cart badge as HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_count(&self) -> Result<String> {
        Ok(CartCountHtml {
            count: self.item_count,
        }
        .render()?)
    }

    /// The whole table as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_text(&self) -> Result<String> {
        Ok(CartTableText { table: self }.render()?)
    }
}

impl CartRowView {
    fn new(position: usize, item: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            position,
            name: item.name.to_string(),
            quantity: item.quantity.get(),
            unit_price: Money::new(item.unit_price.amount(), currency).to_string(),
            subtotal: Money::new(item.subtotal(), currency).to_string(),
        }
    }
}

/// One receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLineView {
    pub name: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Read-only summary of a finished purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    pub lines: Vec<ReceiptLineView>,
    pub total: String,
    /// Issue time, already formatted for display.
    pub issued_at: Option<String>,
}

impl ReceiptView {
    /// Build the receipt for `cart`.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| ReceiptLineView {
                    name: item.name.to_string(),
                    quantity: item.quantity.get(),
                    subtotal: Money::new(item.subtotal(), currency).to_string(),
                })
                .collect(),
            total: Money::new(cart.total(), currency).to_string(),
            issued_at: None,
        }
    }

    /// Stamp the receipt with an issue time.
    #[must_use]
    pub fn issued_at(mut self, at: DateTime<Utc>) -> Self {
        self.issued_at = Some(at.format("%d/%m/%Y %H:%M UTC").to_string());
        self
    }

    /// Whether there was nothing to buy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The receipt as HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_html(&self) -> Result<String> {
        Ok(ReceiptHtml { receipt: self }.render()?)
    }

    /// The receipt as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_text(&self) -> Result<String> {
        Ok(ReceiptText { receipt: self }.render()?)
    }
}

/// Cart table body template.
#[derive(Template)]
#[template(path = "cart/rows.html")]
struct CartRowsHtml<'a> {
    table: &'a CartTableView,
}

/// Plain text cart template.
#[derive(Template)]
#[template(path = "cart/table.txt")]
struct CartTableText<'a> {
    table: &'a CartTableView,
}

/// Cart count badge template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
struct CartCountHtml {
    count: usize,
}

/// Receipt template.
#[derive(Template)]
#[template(path = "cart/receipt.html")]
struct ReceiptHtml<'a> {
    receipt: &'a ReceiptView,
}

/// Plain text receipt template.
#[derive(Template)]
#[template(path = "cart/receipt.txt")]
struct ReceiptText<'a> {
    receipt: &'a ReceiptView,
}
