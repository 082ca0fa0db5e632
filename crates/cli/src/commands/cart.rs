//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (a second add of the same name bumps its quantity)
//! tabcart add "Book" 10.00
//!
//! # Adjust a line by name or by position
//! tabcart inc Book
//! tabcart dec --index 0
//! tabcart remove Book
//!
//! # Show the cart, render the receipt, check out
//! tabcart show
//! tabcart receipt --html
//! tabcart receipt --checkout
//! ```

use std::io::Write;

use chrono::Utc;
use tabcart_core::LineChange;
use tabcart_widget::{CartTableView, ReceiptView, added_notice};

use super::{CommandError, Session};

/// Which line a quantity command applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRef {
    /// The line with this product name.
    Name(String),
    /// The line at this zero-based position.
    Index(usize),
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the name or price is invalid, or storage fails.
pub fn add(
    session: &mut Session,
    out: &mut impl Write,
    name: &str,
    price: &str,
) -> Result<(), CommandError> {
    let added = session.service.add_product(name, price)?;
    writeln!(out, "{}", added_notice(added.name.as_str()))?;
    writeln!(
        out,
        "Quantidade: {} | Itens no carrinho: {}",
        added.quantity, added.summary.line_count
    )?;
    Ok(())
}

/// Add one unit to a line.
///
/// # Errors
///
/// Returns an error if the line does not exist or storage fails.
pub fn increase(
    session: &mut Session,
    out: &mut impl Write,
    line: &LineRef,
) -> Result<(), CommandError> {
    let quantity = match line {
        LineRef::Name(name) => session.service.increase(name)?,
        LineRef::Index(index) => session.service.increase_at(*index)?,
    };
    writeln!(out, "Quantidade: {quantity}")?;
    Ok(())
}

/// Take one unit from a line, removing it at one.
///
/// # Errors
///
/// Returns an error if the line does not exist or storage fails.
pub fn decrease(
    session: &mut Session,
    out: &mut impl Write,
    line: &LineRef,
) -> Result<(), CommandError> {
    let change = match line {
        LineRef::Name(name) => session.service.decrease(name)?,
        LineRef::Index(index) => session.service.decrease_at(*index)?,
    };
    match change {
        LineChange::Quantity(quantity) => writeln!(out, "Quantidade: {quantity}")?,
        LineChange::Removed => writeln!(out, "Item removido do carrinho.")?,
    }
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the line does not exist or storage fails.
pub fn remove(
    session: &mut Session,
    out: &mut impl Write,
    line: &LineRef,
) -> Result<(), CommandError> {
    let item = match line {
        LineRef::Name(name) => session.service.remove(name)?,
        LineRef::Index(index) => session.service.remove_at(*index)?,
    };
    writeln!(out, "{} removido do carrinho.", item.name)?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn clear(session: &mut Session, out: &mut impl Write) -> Result<(), CommandError> {
    session.service.clear()?;
    writeln!(out, "Carrinho esvaziado.")?;
    Ok(())
}

/// Print the cart table.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn show(session: &Session, out: &mut impl Write, html: bool) -> Result<(), CommandError> {
    let table = CartTableView::new(&session.service.load(), session.currency);
    if html {
        writeln!(out, "{}", table.render_rows()?.trim())?;
        writeln!(out, "{}", table.render_count()?.trim())?;
    } else {
        writeln!(out, "{}", table.render_text()?.trim_end())?;
    }
    Ok(())
}

/// Print the receipt, then empty the cart if `checkout` is set and the cart
/// was not already empty.
///
/// # Errors
///
/// Returns an error if rendering, writing, or storage fails.
pub fn receipt(
    session: &mut Session,
    out: &mut impl Write,
    html: bool,
    checkout: bool,
) -> Result<(), CommandError> {
    let receipt =
        ReceiptView::new(&session.service.load(), session.currency).issued_at(Utc::now());
    let rendered = if html {
        receipt.render_html()?
    } else {
        receipt.render_text()?
    };
    writeln!(out, "{}", rendered.trim())?;

    if checkout && !receipt.is_empty() {
        session.service.clear()?;
        tracing::info!("Checkout complete, cart cleared");
    }
    Ok(())
}

/// Print the stored cart as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn export(session: &Session, out: &mut impl Write) -> Result<(), CommandError> {
    let cart = session.service.load();
    writeln!(out, "{}", serde_json::to_string_pretty(&cart)?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tabcart_core::CurrencyCode;
    use tabcart_widget::WidgetConfig;
    use tempfile::TempDir;

    use super::*;

    fn session() -> (TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let config = WidgetConfig {
            store_path: dir.path().join("store.json"),
            ..WidgetConfig::default()
        };
        (dir, Session::open(&config))
    }

    fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<(), CommandError>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_twice() {
        let (_dir, mut s) = session();
        run(|out| add(&mut s, out, "Book", "10.00"));
        let output = run(|out| add(&mut s, out, "Book", "10.00"));

        assert!(output.contains("Book adicionado com sucesso ao carrinho!"));
        assert!(output.contains("Quantidade: 2 | Itens no carrinho: 1"));
    }

    #[test]
    fn test_add_invalid_price() {
        let (_dir, mut s) = session();
        let mut out = Vec::new();
        assert!(add(&mut s, &mut out, "Book", "ten").is_err());
        assert!(s.service.load().is_empty());
    }

    #[test]
    fn test_quantity_commands() {
        let (_dir, mut s) = session();
        run(|out| add(&mut s, out, "Book", "10"));
        run(|out| add(&mut s, out, "Pen", "2"));

        let output = run(|out| increase(&mut s, out, &LineRef::Index(1)));
        assert_eq!(output, "Quantidade: 2\n");

        let output = run(|out| decrease(&mut s, out, &LineRef::Name("Book".into())));
        assert_eq!(output, "Item removido do carrinho.\n");

        let output = run(|out| remove(&mut s, out, &LineRef::Name("Pen".into())));
        assert_eq!(output, "Pen removido do carrinho.\n");
        assert!(s.service.load().is_empty());
    }

    #[test]
    fn test_missing_line() {
        let (_dir, mut s) = session();
        let mut out = Vec::new();
        assert!(increase(&mut s, &mut out, &LineRef::Index(0)).is_err());
        assert!(remove(&mut s, &mut out, &LineRef::Name("Book".into())).is_err());
    }

    #[test]
    fn test_show_text_and_html() {
        let (_dir, mut s) = session();
        s.currency = CurrencyCode::USD;
        run(|out| add(&mut s, out, "Book", "10"));

        let text = run(|out| show(&s, out, false));
        assert!(text.contains("1. Book x1 $10.00"));
        assert!(text.contains("Total: $10.00"));

        let html = run(|out| show(&s, out, true));
        assert!(html.contains("<td>Book</td>"));
        assert!(html.contains("cart-count"));
    }

    #[test]
    fn test_receipt_checkout_clears() {
        let (_dir, mut s) = session();
        run(|out| add(&mut s, out, "Book", "10"));
        run(|out| add(&mut s, out, "Book", "10"));

        let preview = run(|out| receipt(&mut s, out, false, false));
        assert!(preview.contains("2x Book — R$\u{a0}20,00"));
        assert!(preview.contains("Emitido em"));
        assert_eq!(s.service.load().len(), 1);

        let html = run(|out| receipt(&mut s, out, true, true));
        assert!(html.contains("<li>2x Book — R$\u{a0}20,00</li>"));
        assert!(s.service.load().is_empty());

        let empty = run(|out| receipt(&mut s, out, false, true));
        assert!(empty.contains("Seu carrinho está vazio!"));
    }

    #[test]
    fn test_clear_and_export() {
        let (_dir, mut s) = session();
        run(|out| add(&mut s, out, "Book", "10"));

        let json = run(|out| export(&s, out));
        assert!(json.contains("\"nome\": \"Book\""));

        run(|out| clear(&mut s, out));
        assert_eq!(run(|out| export(&s, out)).trim(), "[]");
    }
}
