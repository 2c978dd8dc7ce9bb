// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, OrderStatus};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::ItemNotFound {
        item_id: String::from("x1"),
    };
    assert_eq!(format!("{err}"), "Item 'x1' not found in catalog");

    let err: DomainError = DomainError::SoldOut {
        item_id: String::from("f1"),
    };
    assert_eq!(format!("{err}"), "Item 'f1' is sold out");

    let err: DomainError = DomainError::SoldOutAtCheckout {
        item_ids: vec![String::from("f1"), String::from("d2")],
    };
    assert_eq!(
        format!("{err}"),
        "Some items in your cart are now sold out: f1, d2"
    );

    let err: DomainError = DomainError::EmptyCart;
    assert_eq!(format!("{err}"), "Cart is empty");

    let err: DomainError = DomainError::InvalidDeliveryInfo { field: "address" };
    assert_eq!(
        format!("{err}"),
        "Invalid delivery info: address cannot be empty"
    );

    let err: DomainError = DomainError::DuplicateEmail(String::from("user@demo"));
    assert_eq!(
        format!("{err}"),
        "An account with email 'user@demo' already exists"
    );

    let err: DomainError = DomainError::InvalidCancelState {
        order_id: 7,
        status: OrderStatus::OutForDelivery,
    };
    assert_eq!(
        format!("{err}"),
        "Order 7 cannot be cancelled while Out for Delivery"
    );

    let err: DomainError = DomainError::OrderNotFound(42);
    assert_eq!(format!("{err}"), "Order 42 not found");

    let err: DomainError = DomainError::InvalidStatusTransition {
        from: String::from("Delivered"),
        to: String::from("Pending"),
        reason: String::from("a delivered order cannot be reopened"),
    };
    assert_eq!(
        format!("{err}"),
        "Cannot change order status from Delivered to Pending: a delivered order cannot be reopened"
    );
}
