//! Page events and the surface the widget draws into.
//!
//! A host page forwards clicks and lifecycle events as [`CartEvent`]s to a
//! [`CartController`], which mutates the stored cart and pushes fresh markup
//! into a [`CartSurface`].

use tabcart_core::CurrencyCode;
use tracing::{debug, instrument};

use crate::config::WidgetConfig;
use crate::error::Result;
use crate::service::CartService;
use crate::store::CartStore;
use crate::views::{CartTableView, ReceiptView};

/// The display containers a page offers the widget.
pub trait CartSurface {
    /// Whether the page has a cart table. When it does not, table rows and
    /// the total are not rendered.
    fn has_cart_table(&self) -> bool {
        true
    }

    /// Replace the cart table body with `html` (a sequence of `<tr>`).
    fn set_cart_rows(&mut self, html: &str);

    /// Replace the cart total text.
    fn set_cart_total(&mut self, text: &str);

    /// Update the item-count badge. Pages without a badge ignore this.
    fn set_item_count(&mut self, count: usize);

    /// Replace the receipt container with `html`.
    fn set_receipt(&mut self, html: &str);

    /// Show a transient message to the shopper.
    fn notify(&mut self, message: &str);
}

/// Something the shopper or the page lifecycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// An add-to-cart control was clicked; fields are its data attributes.
    AddToCart { name: String, price: String },
    /// A row's `+` control.
    Increase { name: String },
    /// A row's `-` control.
    Decrease { name: String },
    /// A row's remove control.
    Remove { name: String },
    /// The clear-cart control.
    ClearCart,
    /// Any page was shown.
    PageShow,
    /// The receipt view was shown.
    ReceiptShow,
    /// The receipt view was closed; the purchase is complete.
    ReceiptHide,
}

impl CartEvent {
    /// Map a rendered row control (`data-action`, `data-name`) to its event.
    #[must_use]
    pub fn from_action(action: &str, name: &str) -> Option<Self> {
        let name = name.to_owned();
        match action {
            "increase" => Some(Self::Increase { name }),
            "decrease" => Some(Self::Decrease { name }),
            "remove" => Some(Self::Remove { name }),
            _ => None,
        }
    }
}

/// Message shown after a product is added.
#[must_use]
pub fn added_notice(name: &str) -> String {
    format!("{name} adicionado com sucesso ao carrinho!")
}

/// Routes events to the cart service and redraws the surface.
#[derive(Debug, Clone)]
pub struct CartController<S> {
    service: CartService<S>,
    currency: CurrencyCode,
}

impl<S: CartStore> CartController<S> {
    /// A controller over `service`, formatting amounts in `currency`.
    pub const fn new(service: CartService<S>, currency: CurrencyCode) -> Self {
        Self { service, currency }
    }

    /// A controller over `store` configured from `config`.
    pub fn from_config(store: S, config: &WidgetConfig) -> Self {
        Self::new(CartService::from_config(store, config), config.currency)
    }

    /// The cart service.
    pub const fn service(&self) -> &CartService<S> {
        &self.service
    }

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event's input is invalid, addresses a product
    /// not in the cart, or storage or rendering fails. The surface is left as
    /// it was when that happens.
    #[instrument(skip(self, surface))]
    pub fn dispatch(&mut self, event: CartEvent, surface: &mut impl CartSurface) -> Result<()> {
        match event {
            CartEvent::AddToCart { name, price } => {
                let added = self.service.add_product(&name, &price)?;
                surface.notify(&added_notice(added.name.as_str()));
            }
            CartEvent::Increase { name } => {
                self.service.increase(&name)?;
            }
            CartEvent::Decrease { name } => {
                self.service.decrease(&name)?;
            }
            CartEvent::Remove { name } => {
                self.service.remove(&name)?;
            }
            CartEvent::ClearCart | CartEvent::ReceiptHide => {
                self.service.clear()?;
            }
            CartEvent::PageShow => {
                self.service.normalize()?;
            }
            CartEvent::ReceiptShow => {
                self.show_receipt(surface)?;
                return Ok(());
            }
        }

        self.refresh(surface)
    }

    /// Render the current receipt into the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn show_receipt(&self, surface: &mut impl CartSurface) -> Result<()> {
        let receipt = ReceiptView::new(&self.service.load(), self.currency);
        surface.set_receipt(&receipt.render_html()?);
        Ok(())
    }

    /// Redraw the cart table, total, and badge from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn refresh(&self, surface: &mut impl CartSurface) -> Result<()> {
        let table = CartTableView::new(&self.service.load(), self.currency);

        if surface.has_cart_table() {
            surface.set_cart_rows(&table.render_rows()?);
            surface.set_cart_total(&table.total);
        } else {
            debug!("No cart table on page, skipping rows");
        }
        surface.set_item_count(table.item_count);
        Ok(())
    }
}

/// A surface that records what was drawn into it.
///
/// Useful for hosts that apply changes in bulk, and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Whether this page has a cart table.
    pub has_table: bool,
    pub cart_rows: Option<String>,
    pub cart_total: Option<String>,
    pub item_count: Option<usize>,
    pub receipt: Option<String>,
    pub notices: Vec<String>,
}

impl PageSnapshot {
    /// A page with a cart table.
    #[must_use]
    pub fn cart_page() -> Self {
        Self {
            has_table: true,
            ..Self::default()
        }
    }

    /// A page without a cart table (e.g., the product listing).
    #[must_use]
    pub fn other_page() -> Self {
        Self::default()
    }
}

impl CartSurface for PageSnapshot {
    fn has_cart_table(&self) -> bool {
        self.has_table
    }

    fn set_cart_rows(&mut self, html: &str) {
        self.cart_rows = Some(html.to_owned());
    }

    fn set_cart_total(&mut self, text: &str) {
        self.cart_total = Some(text.to_owned());
    }

    fn set_item_count(&mut self, count: usize) {
        self.item_count = Some(count);
    }

    fn set_receipt(&mut self, html: &str) {
        self.receipt = Some(html.to_owned());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::WidgetError;
    use crate::store::MemoryStore;

    fn controller() -> CartController<MemoryStore> {
        CartController::new(CartService::new(MemoryStore::new()), CurrencyCode::BRL)
    }

    fn add(name: &str, price: &str) -> CartEvent {
        CartEvent::AddToCart {
            name: name.to_owned(),
            price: price.to_owned(),
        }
    }

    #[test]
    fn test_add_notifies_and_refreshes() {
        let mut ctl = controller();
        let mut page = PageSnapshot::cart_page();

        ctl.dispatch(add("Book", "10.00"), &mut page).unwrap();

        assert_eq!(page.notices, ["Book adicionado com sucesso ao carrinho!"]);
        assert_eq!(page.item_count, Some(1));
        assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}10,00"));
        assert!(page.cart_rows.unwrap().contains("<td>Book</td>"));
    }

    #[test]
    fn test_add_twice_total() {
        let mut ctl = controller();
        let mut page = PageSnapshot::cart_page();

        ctl.dispatch(add("Book", "10.00"), &mut page).unwrap();
        ctl.dispatch(add("Book", "10.00"), &mut page).unwrap();

        assert_eq!(page.item_count, Some(1));
        assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}20,00"));
    }

    #[test]
    fn test_page_without_table_only_updates_badge() {
        let mut ctl = controller();
        let mut page = PageSnapshot::other_page();

        ctl.dispatch(add("Book", "10"), &mut page).unwrap();

        assert_eq!(page.item_count, Some(1));
        assert!(page.cart_rows.is_none());
        assert!(page.cart_total.is_none());
    }

    #[test]
    fn test_row_actions() {
        let mut ctl = controller();
        let mut page = PageSnapshot::cart_page();
        ctl.dispatch(add("Book", "10"), &mut page).unwrap();
        ctl.dispatch(add("Pen", "2"), &mut page).unwrap();

        ctl.dispatch(CartEvent::from_action("increase", "Pen").unwrap(), &mut page)
            .unwrap();
        assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}14,00"));

        ctl.dispatch(CartEvent::from_action("decrease", "Book").unwrap(), &mut page)
            .unwrap();
        assert_eq!(page.item_count, Some(1));

        ctl.dispatch(CartEvent::from_action("remove", "Pen").unwrap(), &mut page)
            .unwrap();
        assert_eq!(page.item_count, Some(0));
        assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}0,00"));
    }

    #[test]
    fn test_unknown_action() {
        assert!(CartEvent::from_action("explode", "Book").is_none());
    }

    #[test]
    fn test_clear_cart() {
        let mut ctl = controller();
        let mut page = PageSnapshot::cart_page();
        ctl.dispatch(add("Book", "10"), &mut page).unwrap();

        ctl.dispatch(CartEvent::ClearCart, &mut page).unwrap();

        assert!(ctl.service().load().is_empty());
        assert_eq!(page.item_count, Some(0));
        assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}0,00"));
    }

    #[test]
    fn test_receipt_show_then_hide() {
        let mut ctl = controller();
        let mut page = PageSnapshot::cart_page();
        ctl.dispatch(add("Book", "10"), &mut page).unwrap();
        ctl.dispatch(add("Book", "10"), &mut page).unwrap();

        ctl.dispatch(CartEvent::ReceiptShow, &mut page).unwrap();
        let receipt = page.receipt.clone().unwrap();
        assert!(receipt.contains("2x Book — R$\u{a0}20,00"));
        assert!(receipt.contains("Total: R$\u{a0}20,00"));
        assert!(!ctl.service().load().is_empty());

        ctl.dispatch(CartEvent::ReceiptHide, &mut page).unwrap();
        assert!(ctl.service().load().is_empty());
        assert_eq!(page.item_count, Some(0));
    }

    #[test]
    fn test_receipt_on_empty_cart() {
        let mut ctl = controller();
        let mut page = PageSnapshot::cart_page();
        ctl.dispatch(CartEvent::ReceiptShow, &mut page).unwrap();
        assert!(page.receipt.unwrap().contains("Seu carrinho está vazio!"));
    }

    #[test]
    fn test_page_show_normalizes_storage() {
        let store = MemoryStore::with_entry("carrinho", "{broken");
        let mut ctl = CartController::new(CartService::new(store), CurrencyCode::BRL);
        let mut page = PageSnapshot::cart_page();

        ctl.dispatch(CartEvent::PageShow, &mut page).unwrap();

        assert_eq!(ctl.service().store().raw("carrinho"), Some("[]"));
        assert_eq!(page.item_count, Some(0));
    }

    #[test]
    fn test_invalid_add_leaves_surface_untouched() {
        let mut ctl = controller();
        let mut page = PageSnapshot::cart_page();

        let err = ctl.dispatch(add("Book", "free"), &mut page).unwrap_err();

        assert!(matches!(err, WidgetError::Price(_)));
        assert_eq!(page, PageSnapshot::cart_page());
    }

    #[test]
    fn test_from_config() {
        let config = WidgetConfig {
            storage_key: "other".to_string(),
            currency: CurrencyCode::USD,
            ..WidgetConfig::default()
        };
        let mut ctl = CartController::from_config(MemoryStore::new(), &config);
        let mut page = PageSnapshot::cart_page();

        ctl.dispatch(add("Book", "3"), &mut page).unwrap();

        assert_eq!(page.cart_total.as_deref(), Some("$3.00"));
        assert!(ctl.service().store().raw("other").is_some());
    }
}
