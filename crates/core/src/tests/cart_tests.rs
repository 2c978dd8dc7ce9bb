// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::cart_with;
use crate::{CartTransition, Command, CoreError, apply_cart};
use canteen_domain::{AvailabilitySet, Cart, CartLine, Catalog, DomainError, OrderStatus};
use rust_decimal::Decimal;

#[test]
fn test_add_merges_quantities() {
    let catalog: Catalog = Catalog::default_menu();
    let availability: AvailabilitySet = AvailabilitySet::new();
    let cart: Cart = cart_with(&catalog, &[("d1", 2)]);

    let result: CartTransition = apply_cart(
        &cart,
        &catalog,
        &availability,
        Command::AddToCart {
            item_id: String::from("d1"),
            quantity: 3,
        },
    )
    .unwrap();

    assert_eq!(result.new_cart.lines().len(), 1);
    assert_eq!(result.new_cart.line("d1").map(CartLine::quantity), Some(5));
    // The input cart is untouched.
    assert_eq!(cart.line("d1").map(CartLine::quantity), Some(2));
}

#[test]
fn test_add_sold_out_item_is_rejected() {
    let catalog: Catalog = Catalog::default_menu();
    let availability: AvailabilitySet = AvailabilitySet::from_ids(["s1"]);
    let cart: Cart = Cart::new();

    let result: Result<CartTransition, CoreError> = apply_cart(
        &cart,
        &catalog,
        &availability,
        Command::AddToCart {
            item_id: String::from("s1"),
            quantity: 1,
        },
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::SoldOut {
            item_id: String::from("s1")
        }))
    );
}

#[test]
fn test_set_quantity_zero_removes_line_from_subtotal() {
    let catalog: Catalog = Catalog::default_menu();
    let availability: AvailabilitySet = AvailabilitySet::new();
    let cart: Cart = cart_with(&catalog, &[("f1", 1), ("d4", 2)]);

    let result: CartTransition = apply_cart(
        &cart,
        &catalog,
        &availability,
        Command::SetCartQuantity {
            item_id: String::from("f1"),
            quantity: 0,
        },
    )
    .unwrap();

    assert!(result.new_cart.line("f1").is_none());
    assert_eq!(result.new_cart.subtotal(), Decimal::from(30));
}

#[test]
fn test_set_quantity_ignores_sold_out_state() {
    let catalog: Catalog = Catalog::default_menu();
    let cart: Cart = cart_with(&catalog, &[("f1", 1)]);
    let availability: AvailabilitySet = AvailabilitySet::from_ids(["f1"]);

    let result: CartTransition = apply_cart(
        &cart,
        &catalog,
        &availability,
        Command::SetCartQuantity {
            item_id: String::from("f1"),
            quantity: 4,
        },
    )
    .unwrap();

    assert_eq!(result.new_cart.line("f1").map(CartLine::quantity), Some(4));
}

#[test]
fn test_remove_and_clear() {
    let catalog: Catalog = Catalog::default_menu();
    let availability: AvailabilitySet = AvailabilitySet::new();
    let cart: Cart = cart_with(&catalog, &[("s2", 1), ("s3", 1)]);

    let removed: CartTransition = apply_cart(
        &cart,
        &catalog,
        &availability,
        Command::RemoveFromCart {
            item_id: String::from("s2"),
        },
    )
    .unwrap();
    assert_eq!(removed.new_cart.lines().len(), 1);

    let cleared: CartTransition =
        apply_cart(&removed.new_cart, &catalog, &availability, Command::ClearCart).unwrap();
    assert!(cleared.new_cart.is_empty());
}

#[test]
fn test_non_cart_command_is_rejected() {
    let catalog: Catalog = Catalog::default_menu();
    let availability: AvailabilitySet = AvailabilitySet::new();

    let result: Result<CartTransition, CoreError> = apply_cart(
        &Cart::new(),
        &catalog,
        &availability,
        Command::SetOrderStatus {
            status: OrderStatus::Preparing,
        },
    );

    assert_eq!(result, Err(CoreError::UnsupportedCommand("SetOrderStatus")));
}
