// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_stored_order, create_test_admin_actor, create_test_cause, create_test_session, test_now,
};
use crate::{Command, CoreError, OrderOutcome, OrderTransition, apply_order_transition};
use canteen_audit::Actor;
use canteen_domain::{DomainError, Order, OrderStatus};
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

#[test]
fn test_admin_can_jump_pending_to_delivered() {
    let order: Order = create_stored_order(OrderStatus::Pending);
    let later: OffsetDateTime = test_now() + Duration::minutes(45);

    let result: OrderTransition = apply_order_transition(
        &order,
        Command::SetOrderStatus {
            status: OrderStatus::Delivered,
        },
        create_test_admin_actor(),
        create_test_cause(),
        later,
    )
    .unwrap();

    let OrderOutcome::Updated(updated) = result.outcome else {
        panic!("expected an updated order");
    };
    assert_eq!(updated.status(), OrderStatus::Delivered);
    assert_eq!(updated.updated_at(), later);
    assert_eq!(updated.created_at(), order.created_at());
    assert_eq!(updated.total(), Decimal::from(70));

    assert_eq!(result.audit_event.order_id, Some(17));
    assert_eq!(result.audit_event.action.name, "SetOrderStatus");
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Pending -> Delivered")
    );
}

#[test]
fn test_delivered_order_cannot_be_reopened() {
    let order: Order = create_stored_order(OrderStatus::Delivered);

    let result: Result<OrderTransition, CoreError> = apply_order_transition(
        &order,
        Command::SetOrderStatus {
            status: OrderStatus::Preparing,
        },
        create_test_admin_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_owner_cancel_pending_removes_order() {
    let order: Order = create_stored_order(OrderStatus::Pending);
    let actor: Actor = Actor::from(&create_test_session());

    let result: OrderTransition = apply_order_transition(
        &order,
        Command::CancelOrder,
        actor,
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert!(matches!(
        result.outcome,
        OrderOutcome::Removed {
            order_id: 17,
            expected_status: Some(OrderStatus::Pending),
            ..
        }
    ));
    assert_eq!(result.audit_event.action.name, "CancelOrder");
    assert!(result.audit_event.after.data.is_empty());
    assert!(!result.audit_event.before.data.is_empty());
}

#[test]
fn test_owner_cancel_preparing_fails() {
    let order: Order = create_stored_order(OrderStatus::Preparing);
    let actor: Actor = Actor::from(&create_test_session());

    let result: Result<OrderTransition, CoreError> = apply_order_transition(
        &order,
        Command::CancelOrder,
        actor,
        create_test_cause(),
        test_now(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidCancelState {
            order_id: 17,
            status: OrderStatus::Preparing
        }))
    );
    assert_eq!(order.status(), OrderStatus::Preparing);
}

#[test]
fn test_admin_delete_works_in_any_status() {
    for status in OrderStatus::ALL {
        let order: Order = create_stored_order(status);

        let result: OrderTransition = apply_order_transition(
            &order,
            Command::DeleteOrder,
            create_test_admin_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap();

        assert!(matches!(
            result.outcome,
            OrderOutcome::Removed {
                expected_status: None,
                ..
            }
        ));
    }
}

#[test]
fn test_unsaved_order_is_rejected() {
    let stored: Order = create_stored_order(OrderStatus::Pending);
    let unsaved: Order = Order::place(
        stored.owner_id(),
        stored.owner_email(),
        stored.delivery().clone(),
        &canteen_domain::Cart::new(),
        test_now(),
    );

    let result: Result<OrderTransition, CoreError> = apply_order_transition(
        &unsaved,
        Command::DeleteOrder,
        create_test_admin_actor(),
        create_test_cause(),
        test_now(),
    );

    assert_eq!(result, Err(CoreError::UnsavedOrder));
}
