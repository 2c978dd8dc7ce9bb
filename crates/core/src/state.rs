// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen_audit::{AuditEvent, StateSnapshot};
use canteen_domain::{AvailabilitySet, Cart, Order, OrderStatus};

/// Renders an order for audit purposes.
#[must_use]
pub fn order_snapshot(order: &Order) -> StateSnapshot {
    StateSnapshot::new(format!(
        "owner_id={},status={},lines={},items_total={},delivery_fee={},total={}",
        order.owner_id(),
        order.status().as_str(),
        order.lines().len(),
        order.items_total(),
        order.delivery_fee(),
        order.total()
    ))
}

/// The result of a cart command.
///
/// Cart edits are not audited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTransition {
    /// The cart after the command.
    pub new_cart: Cart,
}

/// The result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResult {
    /// The new order, not yet assigned an id.
    pub order: Order,
    /// The cart after checkout (empty).
    pub new_cart: Cart,
    /// The audit event recording the checkout, not yet scoped to the order.
    pub audit_event: AuditEvent,
}

/// What happened to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The order remains in the ledger with new contents.
    Updated(Order),
    /// The order is removed from the ledger.
    Removed {
        /// The removed order.
        order_id: i64,
        /// The order as it was before removal.
        previous: Order,
        /// If set, the removal only applies while the stored order is
        /// still in this status.
        expected_status: Option<OrderStatus>,
    },
}

/// The result of a status change, cancellation or deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTransition {
    /// The resulting ledger change.
    pub outcome: OrderOutcome,
    /// The audit event recording this transition, scoped to the order.
    pub audit_event: AuditEvent,
}

/// The result of a sold out toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityTransition {
    /// The availability after the toggle.
    pub new_availability: AvailabilitySet,
    /// The toggled item.
    pub item_id: String,
    /// Whether the item is sold out after the toggle.
    pub sold_out: bool,
    /// The audit event recording this toggle.
    pub audit_event: AuditEvent,
}
