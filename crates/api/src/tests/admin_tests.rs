// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for admin order management and menu availability handlers.

use canteen_domain::Catalog;

use super::helpers::{
    TestSession, create_test_cause, create_test_persistence, login_admin, place_test_order,
    register_customer,
};
use crate::error::ApiError;
use crate::{
    SetOrderStatusRequest, SetOrderStatusResponse, admin_menu, delete_order, list_all_orders,
    order_history, set_order_status, toggle_sold_out,
};
use canteen_persistence::Persistence;

fn set_status(
    persistence: &mut Persistence,
    admin: &TestSession,
    order_id: i64,
    status: &str,
) -> Result<SetOrderStatusResponse, ApiError> {
    set_order_status(
        persistence,
        order_id,
        &SetOrderStatusRequest {
            status: status.to_string(),
        },
        &admin.actor,
        &admin.account,
        create_test_cause(),
    )
}

#[test]
fn test_list_all_orders_requires_admin() {
    let mut persistence = create_test_persistence();
    let customer = register_customer(&mut persistence, "maria@example.com");

    let result = list_all_orders(&mut persistence, &customer.actor);

    match result.unwrap_err() {
        ApiError::Unauthorized { action, .. } => assert_eq!(action, "list_all_orders"),
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }
}

#[test]
fn test_list_all_orders_returns_every_customer_newest_first() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let maria = register_customer(&mut persistence, "maria@example.com");
    let jose = register_customer(&mut persistence, "jose@example.com");
    let first = place_test_order(&mut persistence, &maria, &[("s1", 1)]);
    let second = place_test_order(&mut persistence, &jose, &[("d3", 2)]);

    let all = list_all_orders(&mut persistence, &admin.actor).unwrap();

    let ids: Vec<i64> = all.orders.iter().map(|o| o.order_id).collect();
    assert_eq!(ids, vec![second.order.order_id, first.order.order_id]);
}

#[test]
fn test_admin_can_jump_straight_to_delivered() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);

    let response = set_status(&mut persistence, &admin, placed.order.order_id, "Delivered").unwrap();

    assert_eq!(response.previous_status, "Pending");
    assert_eq!(response.order.status, "Delivered");
    assert!(!response.order.capabilities.can_set_status.is_allowed());
}

#[test]
fn test_status_labels_are_parsed_loosely() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);
    let order_id = placed.order.order_id;

    let response = set_status(&mut persistence, &admin, order_id, "out_for_delivery").unwrap();
    assert_eq!(response.order.status, "Out for Delivery");

    // Moving backwards is allowed before delivery
    let response = set_status(&mut persistence, &admin, order_id, "preparing").unwrap();
    assert_eq!(response.previous_status, "Out for Delivery");
    assert_eq!(response.order.status, "Preparing");
}

#[test]
fn test_delivered_order_cannot_be_reopened() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);
    let order_id = placed.order.order_id;
    set_status(&mut persistence, &admin, order_id, "Delivered").unwrap();

    let result = set_status(&mut persistence, &admin, order_id, "Preparing");

    assert_eq!(
        result.unwrap_err().rule(),
        Some("invalid_status_transition")
    );
    let stored = persistence.get_order(order_id).unwrap().unwrap();
    assert_eq!(stored.status().as_str(), "Delivered");
}

#[test]
fn test_unknown_status_is_invalid_input() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);

    let result = set_status(&mut persistence, &admin, placed.order.order_id, "Shipped");

    match result.unwrap_err() {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "status"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_set_status_requires_admin_and_existing_order() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);

    let by_customer = set_status(&mut persistence, &customer, placed.order.order_id, "Preparing");
    assert!(matches!(by_customer, Err(ApiError::Unauthorized { .. })));

    let missing = set_status(&mut persistence, &admin, 9999, "Preparing");
    assert!(matches!(missing, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_admin_delete_works_in_any_status_and_is_audited() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);
    let order_id = placed.order.order_id;
    set_status(&mut persistence, &admin, order_id, "Out for Delivery").unwrap();

    let response = delete_order(
        &mut persistence,
        order_id,
        &admin.actor,
        &admin.account,
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.previous_status, "Out for Delivery");
    assert!(persistence.get_order(order_id).unwrap().is_none());

    let history = order_history(&mut persistence, order_id, &admin.actor).unwrap();
    let actions: Vec<&str> = history.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["PlaceOrder", "SetOrderStatus", "DeleteOrder"]);
    assert_eq!(history.events[2].actor_role, "admin");
}

#[test]
fn test_delete_requires_admin_and_existing_order() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);

    let by_customer = delete_order(
        &mut persistence,
        placed.order.order_id,
        &customer.actor,
        &customer.account,
        create_test_cause(),
    );
    match by_customer.unwrap_err() {
        ApiError::Unauthorized { action, .. } => assert_eq!(action, "delete_order"),
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }

    let missing = delete_order(
        &mut persistence,
        9999,
        &admin.actor,
        &admin.account,
        create_test_cause(),
    );
    assert!(matches!(missing, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_order_history_requires_admin() {
    let mut persistence = create_test_persistence();
    let customer = register_customer(&mut persistence, "maria@example.com");
    let placed = place_test_order(&mut persistence, &customer, &[("f3", 1)]);

    let result = order_history(&mut persistence, placed.order.order_id, &customer.actor);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_toggle_twice_restores_availability() {
    let mut persistence = create_test_persistence();
    let catalog = Catalog::default_menu();
    let admin = login_admin(&mut persistence);

    let first = toggle_sold_out(
        &mut persistence,
        &catalog,
        "d6",
        &admin.actor,
        &admin.account,
        create_test_cause(),
    )
    .unwrap();
    assert!(first.sold_out);
    assert_eq!(
        admin_menu(&mut persistence, &catalog, &admin.actor)
            .unwrap()
            .sold_out_count,
        1
    );

    let second = toggle_sold_out(
        &mut persistence,
        &catalog,
        "d6",
        &admin.actor,
        &admin.account,
        create_test_cause(),
    )
    .unwrap();
    assert!(!second.sold_out);
    assert_ne!(first.event_id, second.event_id);

    let menu = admin_menu(&mut persistence, &catalog, &admin.actor).unwrap();
    assert_eq!(menu.sold_out_count, 0);
    assert_eq!(menu.items.len(), catalog.len());
}

#[test]
fn test_toggle_unknown_item_is_not_found() {
    let mut persistence = create_test_persistence();
    let admin = login_admin(&mut persistence);

    let result = toggle_sold_out(
        &mut persistence,
        &Catalog::default_menu(),
        "x9",
        &admin.actor,
        &admin.account,
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert!(persistence.load_availability().unwrap().is_empty());
}

#[test]
fn test_menu_administration_requires_admin() {
    let mut persistence = create_test_persistence();
    let catalog = Catalog::default_menu();
    let customer = register_customer(&mut persistence, "maria@example.com");

    assert!(matches!(
        admin_menu(&mut persistence, &catalog, &customer.actor),
        Err(ApiError::Unauthorized { .. })
    ));

    let result = toggle_sold_out(
        &mut persistence,
        &catalog,
        "d6",
        &customer.actor,
        &customer.account,
        create_test_cause(),
    );
    match result.unwrap_err() {
        ApiError::Unauthorized { action, .. } => assert_eq!(action, "manage_menu"),
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }
}
