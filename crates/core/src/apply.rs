// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    AvailabilityTransition, CartTransition, CheckoutResult, OrderOutcome, OrderTransition,
    order_snapshot,
};
use canteen_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use canteen_domain::{
    AvailabilitySet, Cart, Catalog, DeliveryInfo, DomainError, Order, OrderStatus, Session,
};
use time::OffsetDateTime;

/// Applies a cart command, producing a new cart.
///
/// # Arguments
///
/// * `cart` - The current cart (immutable)
/// * `catalog` - The menu
/// * `availability` - Current sold out state
/// * `command` - One of the cart commands
///
/// # Errors
///
/// Returns an error if:
/// - The item is unknown or sold out (add only)
/// - The quantity is invalid
/// - The command is not a cart command
pub fn apply_cart(
    cart: &Cart,
    catalog: &Catalog,
    availability: &AvailabilitySet,
    command: Command,
) -> Result<CartTransition, CoreError> {
    let mut new_cart: Cart = cart.clone();

    match command {
        Command::AddToCart { item_id, quantity } => {
            new_cart.add(catalog, availability, &item_id, quantity)?;
        }
        Command::SetCartQuantity { item_id, quantity } => {
            new_cart.set_quantity(&item_id, quantity)?;
        }
        Command::RemoveFromCart { item_id } => {
            new_cart.remove(&item_id);
        }
        Command::ClearCart => new_cart.clear(),
        other => return Err(CoreError::UnsupportedCommand(other.name())),
    }

    Ok(CartTransition { new_cart })
}

/// Converts a cart into a pending order.
///
/// Preconditions are checked in a fixed order and the first failure is
/// returned: session, non-empty cart, availability, delivery details.
///
/// # Arguments
///
/// * `session` - The active session, if any
/// * `cart` - The session's cart
/// * `availability` - Sold out state at commit time
/// * `command` - Must be `Command::PlaceOrder`
/// * `cause` - The cause or reason for this action
/// * `now` - Placement timestamp
///
/// # Returns
///
/// * `Ok(CheckoutResult)` with the unsaved order, the emptied cart and
///   the audit event
/// * `Err(CoreError)` if any precondition fails
///
/// # Errors
///
/// Returns an error if:
/// - There is no active session
/// - The cart is empty
/// - Any cart line is now sold out
/// - A delivery field is blank
pub fn apply_checkout(
    session: Option<&Session>,
    cart: &Cart,
    availability: &AvailabilitySet,
    command: Command,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<CheckoutResult, CoreError> {
    let command_name: &'static str = command.name();
    let Command::PlaceOrder {
        recipient_name,
        contact,
        address,
    } = command
    else {
        return Err(CoreError::UnsupportedCommand(command_name));
    };

    let session: &Session = session.ok_or(CoreError::NotAuthenticated)?;

    if cart.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::EmptyCart));
    }

    let sold_out: Vec<String> = cart.sold_out_items(availability);
    if !sold_out.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::SoldOutAtCheckout {
            item_ids: sold_out,
        }));
    }

    let delivery: DeliveryInfo = DeliveryInfo::new(&recipient_name, &contact, &address)?;

    let order: Order = Order::place(session.account_id, &session.email, delivery, cart, now);

    let action: Action = Action::new(
        String::from("PlaceOrder"),
        Some(format!(
            "{} line(s), {} unit(s), total {}",
            order.lines().len(),
            cart.item_count(),
            order.total()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        Actor::from(session),
        cause,
        action,
        StateSnapshot::absent(),
        order_snapshot(&order),
    );

    Ok(CheckoutResult {
        order,
        new_cart: Cart::new(),
        audit_event,
    })
}

/// Applies a status change, owner cancellation or admin deletion.
///
/// Authorization (admin role, ownership) is checked by the caller.
///
/// # Arguments
///
/// * `order` - The stored order
/// * `command` - `SetOrderStatus`, `CancelOrder` or `DeleteOrder`
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - Timestamp of the change
///
/// # Errors
///
/// Returns an error if:
/// - The order has no id
/// - A delivered order would be reopened
/// - A cancel is requested for an order that is no longer pending
/// - The command is not an order command
pub fn apply_order_transition(
    order: &Order,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<OrderTransition, CoreError> {
    let order_id: i64 = order.order_id().ok_or(CoreError::UnsavedOrder)?;
    let before: StateSnapshot = order_snapshot(order);
    let current: OrderStatus = order.status();

    let (outcome, action): (OrderOutcome, Action) = match command {
        Command::SetOrderStatus { status } => {
            current.validate_admin_transition(status)?;
            let updated: Order = order.clone().with_status(status, now);
            let action: Action = Action::new(
                String::from("SetOrderStatus"),
                Some(format!("{} -> {}", current.as_str(), status.as_str())),
            );
            (OrderOutcome::Updated(updated), action)
        }
        Command::CancelOrder => {
            if !current.can_owner_cancel() {
                return Err(CoreError::DomainViolation(
                    DomainError::InvalidCancelState {
                        order_id,
                        status: current,
                    },
                ));
            }
            let action: Action = Action::new(
                String::from("CancelOrder"),
                Some(String::from("Cancelled by owner")),
            );
            (
                OrderOutcome::Removed {
                    order_id,
                    previous: order.clone(),
                    expected_status: Some(OrderStatus::Pending),
                },
                action,
            )
        }
        Command::DeleteOrder => {
            let action: Action = Action::new(
                String::from("DeleteOrder"),
                Some(format!("Deleted while {}", current.as_str())),
            );
            (
                OrderOutcome::Removed {
                    order_id,
                    previous: order.clone(),
                    expected_status: None,
                },
                action,
            )
        }
        other => return Err(CoreError::UnsupportedCommand(other.name())),
    };

    let after: StateSnapshot = match &outcome {
        OrderOutcome::Updated(updated) => order_snapshot(updated),
        OrderOutcome::Removed { .. } => StateSnapshot::absent(),
    };

    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after).with_order_id(order_id);

    Ok(OrderTransition {
        outcome,
        audit_event,
    })
}

/// Toggles the sold out flag of a catalog item.
///
/// # Arguments
///
/// * `catalog` - The menu
/// * `availability` - The current sold out state (immutable)
/// * `command` - Must be `Command::ToggleSoldOut`
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the item is not in the catalog or the command is
/// not a toggle.
pub fn apply_availability(
    catalog: &Catalog,
    availability: &AvailabilitySet,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<AvailabilityTransition, CoreError> {
    let command_name: &'static str = command.name();
    let Command::ToggleSoldOut { item_id } = command else {
        return Err(CoreError::UnsupportedCommand(command_name));
    };

    catalog.lookup(&item_id)?;

    let was_sold_out: bool = availability.is_sold_out(&item_id);
    let mut new_availability: AvailabilitySet = availability.clone();
    let sold_out: bool = new_availability.toggle(&item_id);

    let action: Action = Action::new(
        String::from("ToggleSoldOut"),
        Some(format!(
            "{item_id} marked {}",
            if sold_out { "sold out" } else { "available" }
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        StateSnapshot::new(format!("item_id={item_id},sold_out={was_sold_out}")),
        StateSnapshot::new(format!("item_id={item_id},sold_out={sold_out}")),
    );

    Ok(AvailabilityTransition {
        new_availability,
        item_id,
        sold_out,
        audit_event,
    })
}
