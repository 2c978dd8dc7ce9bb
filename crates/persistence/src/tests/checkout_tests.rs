// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{cart_with, create_customer_session, create_test_admin_actor, create_test_cause, test_now};
use crate::{Persistence, PersistenceError};
use canteen::{CheckoutResult, Command, apply_availability, apply_checkout};
use canteen_domain::{AvailabilitySet, Cart, Catalog, OrderStatus, Session};
use rust_decimal::Decimal;

fn place_order_command() -> Command {
    Command::PlaceOrder {
        recipient_name: String::from("Test User"),
        contact: String::from("09171234567"),
        address: String::from("Room 204, Main Building"),
    }
}

fn checkout(persistence: &mut Persistence, session: &Session, cart: &Cart) -> CheckoutResult {
    let availability = persistence.load_availability().unwrap();
    apply_checkout(
        Some(session),
        cart,
        &availability,
        place_order_command(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

#[test]
fn test_checkout_stores_order_and_clears_cart() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (session, session_id) = create_customer_session(&mut persistence, "user@demo");
    let cart = cart_with(&[("f8", 3), ("d1", 1)]);
    persistence.save_cart(session_id, &cart).unwrap();

    let result = checkout(&mut persistence, &session, &cart);
    let persisted = persistence.persist_checkout(session_id, &result).unwrap();

    let order_id = persisted.order.order_id().unwrap();
    let stored = persistence.get_order(order_id).unwrap().unwrap();
    assert_eq!(stored, persisted.order);
    assert_eq!(stored.status(), OrderStatus::Pending);
    assert_eq!(stored.items_total(), Decimal::from(85));
    assert_eq!(stored.delivery_fee(), Decimal::from(10));
    assert_eq!(stored.total(), Decimal::from(95));
    assert_eq!(stored.payment_method(), "COD");
    assert_eq!(stored.owner_email(), "user@demo");
    assert_eq!(stored.lines().len(), 2);
    assert_eq!(stored.lines()[0].item_id(), "f8");

    assert!(persistence.load_cart(session_id).unwrap().is_empty());
}

#[test]
fn test_checkout_writes_scoped_audit_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (session, session_id) = create_customer_session(&mut persistence, "user@demo");
    let cart = cart_with(&[("f1", 1)]);

    let result = checkout(&mut persistence, &session, &cart);
    let persisted = persistence.persist_checkout(session_id, &result).unwrap();

    let event = persistence.get_audit_event(persisted.event_id).unwrap();
    assert_eq!(event.action.name, "PlaceOrder");
    assert_eq!(event.order_id, persisted.order.order_id());
    assert_eq!(event.actor.email, "user@demo");
    assert_eq!(event.cause.id, "test-cause");
}

#[test]
fn test_item_sold_out_before_commit_blocks_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (session, session_id) = create_customer_session(&mut persistence, "user@demo");
    let cart = cart_with(&[("f1", 1), ("d2", 2), ("d4", 1)]);
    persistence.save_cart(session_id, &cart).unwrap();

    // Checkout is computed while everything is available.
    let result = checkout(&mut persistence, &session, &cart);

    let catalog = Catalog::default_menu();
    for item_id in ["d4", "d2"] {
        let availability = persistence.load_availability().unwrap();
        let toggle = apply_availability(
            &catalog,
            &availability,
            Command::ToggleSoldOut {
                item_id: String::from(item_id),
            },
            create_test_admin_actor(),
            create_test_cause(),
        )
        .unwrap();
        persistence
            .persist_availability_toggle(&toggle, test_now())
            .unwrap();
    }

    let outcome = persistence.persist_checkout(session_id, &result);

    assert_eq!(
        outcome.unwrap_err(),
        PersistenceError::SoldOutConflict {
            item_ids: vec![String::from("d2"), String::from("d4")],
        }
    );
    assert!(persistence.list_all_orders().unwrap().is_empty());
    assert_eq!(persistence.load_cart(session_id).unwrap(), cart);
}

#[test]
fn test_orders_list_newest_first_per_owner() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (alice, alice_session) = create_customer_session(&mut persistence, "alice@demo");
    let (bob, bob_session) = create_customer_session(&mut persistence, "bob@demo");

    let first = checkout(&mut persistence, &alice, &cart_with(&[("f1", 1)]));
    let first_id = persistence
        .persist_checkout(alice_session, &first)
        .unwrap()
        .order
        .order_id()
        .unwrap();
    let second = checkout(&mut persistence, &bob, &cart_with(&[("f2", 1)]));
    let second_id = persistence
        .persist_checkout(bob_session, &second)
        .unwrap()
        .order
        .order_id()
        .unwrap();
    let third = checkout(&mut persistence, &alice, &cart_with(&[("d6", 2)]));
    let third_id = persistence
        .persist_checkout(alice_session, &third)
        .unwrap()
        .order
        .order_id()
        .unwrap();

    let all: Vec<i64> = persistence
        .list_all_orders()
        .unwrap()
        .iter()
        .filter_map(|o| o.order_id())
        .collect();
    assert_eq!(all, vec![third_id, second_id, first_id]);

    let mine = persistence.list_orders_for_owner(alice.account_id).unwrap();
    let mine_ids: Vec<i64> = mine.iter().filter_map(|o| o.order_id()).collect();
    assert_eq!(mine_ids, vec![third_id, first_id]);
    assert_eq!(mine[0].lines()[0].item_id(), "d6");
    assert_eq!(mine[1].lines()[0].item_id(), "f1");
}

#[test]
fn test_get_missing_order_is_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.get_order(404).unwrap().is_none());
}

#[test]
fn test_availability_is_empty_initially() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(persistence.load_availability().unwrap(), AvailabilitySet::new());
}
