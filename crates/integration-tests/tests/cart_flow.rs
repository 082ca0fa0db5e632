//! End-to-end shopper flows through the cart controller.
//!
//! Each test drives the controller the way a page would: clicks and
//! lifecycle events in, markup out through a recording surface.

use rust_decimal::Decimal;
use tabcart_integration_tests::{add_to_cart, memory_controller};
use tabcart_widget::{CartEvent, PageSnapshot, WidgetError};

// =============================================================================
// Adding Products
// =============================================================================

#[test]
fn test_same_product_twice_is_one_line() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();

    ctl.dispatch(add_to_cart("Book", "10.00"), &mut page).unwrap();
    ctl.dispatch(add_to_cart("Book", "10.00"), &mut page).unwrap();

    let cart = ctl.service().load();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get("Book").unwrap().quantity.get(), 2);
    assert_eq!(cart.total(), Decimal::new(2000, 2));
    assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}20,00"));
    assert_eq!(page.notices.len(), 2);
}

#[test]
fn test_total_is_sum_of_lines() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();

    let clicks = [
        ("Book", "39.90"),
        ("Pen", "4.50"),
        ("Pen", "4.50"),
        ("Mug", "1200"),
    ];
    for (name, price) in clicks {
        ctl.dispatch(add_to_cart(name, price), &mut page).unwrap();
    }

    // 39.90 + 2 * 4.50 + 1200
    assert_eq!(ctl.service().load().total(), Decimal::new(124_890, 2));
    assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}1.248,90"));
    assert_eq!(page.item_count, Some(3));
}

#[test]
fn test_invalid_price_is_rejected() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();

    let err = ctl.dispatch(add_to_cart("Book", ""), &mut page).unwrap_err();

    assert!(err.is_user_error());
    assert!(matches!(err, WidgetError::Price(_)));
    assert!(ctl.service().load().is_empty());
    assert!(page.notices.is_empty());
}

// =============================================================================
// Adjusting Lines
// =============================================================================

#[test]
fn test_decrease_from_one_removes_line() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();
    ctl.dispatch(add_to_cart("Book", "10"), &mut page).unwrap();

    ctl.dispatch(CartEvent::Decrease { name: "Book".into() }, &mut page)
        .unwrap();

    assert!(ctl.service().load().is_empty());
    assert_eq!(page.item_count, Some(0));
    assert!(!page.cart_rows.unwrap().contains("<tr"));
}

#[test]
fn test_name_keyed_controls_survive_reordering() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();
    ctl.dispatch(add_to_cart("Book", "10"), &mut page).unwrap();
    ctl.dispatch(add_to_cart("Pen", "2"), &mut page).unwrap();
    ctl.dispatch(add_to_cart("Mug", "5"), &mut page).unwrap();

    // Removing the first line shifts positions; the name still addresses Mug.
    ctl.dispatch(CartEvent::Remove { name: "Book".into() }, &mut page)
        .unwrap();
    ctl.dispatch(CartEvent::Increase { name: "Mug".into() }, &mut page)
        .unwrap();

    let cart = ctl.service().load();
    assert_eq!(cart.get("Mug").unwrap().quantity.get(), 2);
    assert_eq!(cart.get("Pen").unwrap().quantity.get(), 1);
}

#[test]
fn test_rendered_controls_round_trip_to_events() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();
    ctl.dispatch(add_to_cart("Book", "10"), &mut page).unwrap();

    let rows = page.cart_rows.clone().unwrap();
    assert!(rows.contains(r#"data-action="increase" data-name="Book""#));

    let event = CartEvent::from_action("increase", "Book").unwrap();
    ctl.dispatch(event, &mut page).unwrap();
    assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}20,00"));
}

#[test]
fn test_unknown_product_errors() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();

    let err = ctl
        .dispatch(CartEvent::Increase { name: "Ghost".into() }, &mut page)
        .unwrap_err();
    assert!(matches!(err, WidgetError::Cart(_)));
}

// =============================================================================
// Clearing and Checkout
// =============================================================================

#[test]
fn test_clear_yields_empty_and_zero_total() {
    let mut ctl = memory_controller();
    let mut page = PageSnapshot::cart_page();
    ctl.dispatch(add_to_cart("Book", "10"), &mut page).unwrap();
    ctl.dispatch(add_to_cart("Pen", "2"), &mut page).unwrap();

    ctl.dispatch(CartEvent::ClearCart, &mut page).unwrap();

    let cart = ctl.service().load();
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
    assert_eq!(page.cart_total.as_deref(), Some("R$\u{a0}0,00"));

    // Clearing an empty cart is fine too.
    ctl.dispatch(CartEvent::ClearCart, &mut page).unwrap();
    assert!(ctl.service().load().is_empty());
}

#[test]
fn test_checkout_flow() {
    let mut ctl = memory_controller();
    let mut listing = PageSnapshot::other_page();
    let mut receipt_page = PageSnapshot::other_page();

    ctl.dispatch(add_to_cart("Book", "10.00"), &mut listing).unwrap();
    ctl.dispatch(add_to_cart("Pen", "2.50"), &mut listing).unwrap();
    assert_eq!(listing.item_count, Some(2));

    ctl.dispatch(CartEvent::ReceiptShow, &mut receipt_page).unwrap();
    let receipt = receipt_page.receipt.clone().unwrap();
    assert!(receipt.contains("Compra finalizada com sucesso!"));
    assert!(receipt.contains("<li>1x Book — R$\u{a0}10,00</li>"));
    assert!(receipt.contains("<li>1x Pen — R$\u{a0}2,50</li>"));
    assert!(receipt.contains("Total: R$\u{a0}12,50"));

    ctl.dispatch(CartEvent::ReceiptHide, &mut receipt_page).unwrap();
    assert!(ctl.service().load().is_empty());
    assert_eq!(receipt_page.item_count, Some(0));

    // Reopening the receipt now shows the empty message.
    ctl.dispatch(CartEvent::ReceiptShow, &mut receipt_page).unwrap();
    assert!(receipt_page.receipt.unwrap().contains("Seu carrinho está vazio!"));
}
