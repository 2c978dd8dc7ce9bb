// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order ledger mutations.
//!
//! Checkout commits the order, its lines, the audit event and the cart
//! reset as one transaction. Sold out state is read again inside that
//! transaction, so a toggle that lands between the caller's check and
//! the commit still blocks the order.

use canteen::{CheckoutResult, OrderOutcome, OrderTransition};
use canteen_domain::{Order, OrderLine, OrderStatus};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::conversions::{encode_line_no, encode_money, encode_quantity, encode_timestamp};
use crate::diesel_schema::{audit_events, cart_lines, order_lines, orders, sold_out_items};
use crate::error::PersistenceError;
use crate::mutations::audit::NewAuditEvent;

/// Result of committing a checkout.
#[derive(Debug, Clone)]
pub struct PersistCheckoutResult {
    /// The stored order, carrying its assigned id.
    pub order: Order,
    /// The id of the `PlaceOrder` audit event.
    pub event_id: i64,
}

#[derive(Insertable)]
#[diesel(table_name = orders)]
struct NewOrder<'a> {
    owner_account_id: i64,
    owner_email: &'a str,
    recipient_name: &'a str,
    contact: &'a str,
    address: &'a str,
    items_total: String,
    delivery_fee: String,
    total: String,
    payment_method: &'a str,
    status: &'a str,
    created_at: String,
    updated_at: String,
}

impl<'a> NewOrder<'a> {
    fn encode(order: &'a Order) -> Result<Self, PersistenceError> {
        Ok(Self {
            owner_account_id: order.owner_id(),
            owner_email: order.owner_email(),
            recipient_name: order.delivery().recipient_name(),
            contact: order.delivery().contact(),
            address: order.delivery().address(),
            items_total: encode_money(order.items_total()),
            delivery_fee: encode_money(order.delivery_fee()),
            total: encode_money(order.total()),
            payment_method: order.payment_method(),
            status: order.status().as_str(),
            created_at: encode_timestamp(order.created_at())?,
            updated_at: encode_timestamp(order.updated_at())?,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = order_lines)]
struct NewOrderLine<'a> {
    order_id: i64,
    line_no: i32,
    item_id: &'a str,
    name: &'a str,
    unit_price: String,
    quantity: i32,
}

impl<'a> NewOrderLine<'a> {
    fn encode(order_id: i64, index: usize, line: &'a OrderLine) -> Result<Self, PersistenceError> {
        Ok(Self {
            order_id,
            line_no: encode_line_no(index)?,
            item_id: line.item_id(),
            name: line.name(),
            unit_price: encode_money(line.unit_price()),
            quantity: encode_quantity(line.quantity())?,
        })
    }
}

backend_fn! {
/// Commits a checkout.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - The session whose cart is cleared on success
/// * `result` - The checkout produced by the core
///
/// # Errors
///
/// Returns `PersistenceError::SoldOutConflict` if any ordered item is sold
/// out at commit time, or an error if any write fails. Nothing is written
/// in either case.
pub fn persist_checkout(
    conn: &mut _,
    session_id: i64,
    result: &CheckoutResult,
) -> Result<PersistCheckoutResult, PersistenceError> {
    let order: &Order = &result.order;
    let order_row: NewOrder<'_> = NewOrder::encode(order)?;
    let created_at: String = order_row.created_at.clone();
    let item_ids: Vec<&str> = order.lines().iter().map(OrderLine::item_id).collect();

    let (order_id, event_id): (i64, i64) = conn.transaction::<_, PersistenceError, _>(|conn| {
        let sold_out: Vec<String> = sold_out_items::table
            .filter(sold_out_items::item_id.eq_any(item_ids.clone()))
            .select(sold_out_items::item_id)
            .load(conn)?;
        if !sold_out.is_empty() {
            let conflicting: Vec<String> = item_ids
                .iter()
                .filter(|id| sold_out.iter().any(|s| s == *id))
                .map(ToString::to_string)
                .collect();
            return Err(PersistenceError::SoldOutConflict {
                item_ids: conflicting,
            });
        }

        diesel::insert_into(orders::table)
            .values(&order_row)
            .execute(conn)?;
        let order_id: i64 = conn.get_last_insert_rowid()?;

        for (index, line) in order.lines().iter().enumerate() {
            let line_row: NewOrderLine<'_> = NewOrderLine::encode(order_id, index, line)?;
            diesel::insert_into(order_lines::table)
                .values(&line_row)
                .execute(conn)?;
        }

        let audit_row: NewAuditEvent =
            NewAuditEvent::encode(&result.audit_event, Some(order_id), &created_at)?;
        diesel::insert_into(audit_events::table)
            .values(&audit_row)
            .execute(conn)?;
        let event_id: i64 = conn.get_last_insert_rowid()?;

        diesel::delete(cart_lines::table.filter(cart_lines::session_id.eq(session_id)))
            .execute(conn)?;

        Ok((order_id, event_id))
    })?;

    info!(order_id, event_id, owner = order.owner_id(), total = %order.total(), "Order placed");

    Ok(PersistCheckoutResult {
        order: order.clone().assigned(order_id),
        event_id,
    })
}
}

backend_fn! {
/// Persists a status change or removal together with its audit event.
///
/// Status changes are last-writer-wins, except that a delivered order
/// only accepts `Delivered` again. A removal that carries an expected
/// status only deletes the order while it is still in that status.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The transition produced by the core
/// * `now` - Encoded timestamp for the audit event
///
/// # Errors
///
/// Returns an error if:
/// - The order no longer exists
/// - The order left the expected status before the delete ran
/// - The order was delivered after the caller loaded it
/// - Any write fails
pub fn persist_order_transition(
    conn: &mut _,
    transition: &OrderTransition,
    now: &str,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let order_id: i64 = match &transition.outcome {
            OrderOutcome::Updated(order) => {
                let order_id: i64 = order.order_id().ok_or_else(|| {
                    PersistenceError::Other(String::from("Cannot update an unsaved order"))
                })?;
                let updated_at: String = encode_timestamp(order.updated_at())?;

                let changes = (
                    orders::status.eq(order.status().as_str()),
                    orders::updated_at.eq(&updated_at),
                );
                // Only a move to Delivered may touch a delivered row.
                let updated: usize = if order.status() == OrderStatus::Delivered {
                    diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
                        .set(changes)
                        .execute(conn)?
                } else {
                    diesel::update(
                        orders::table
                            .filter(orders::order_id.eq(order_id))
                            .filter(orders::status.ne(OrderStatus::Delivered.as_str())),
                    )
                    .set(changes)
                    .execute(conn)?
                };

                if updated == 0 {
                    let current: Option<String> = orders::table
                        .filter(orders::order_id.eq(order_id))
                        .select(orders::status)
                        .first(conn)
                        .optional()?;
                    return Err(current.map_or(
                        PersistenceError::OrderNotFound(order_id),
                        |status| PersistenceError::StaleOrderState { order_id, status },
                    ));
                }
                order_id
            }
            OrderOutcome::Removed {
                order_id,
                expected_status,
                ..
            } => {
                let order_id: i64 = *order_id;
                let deleted: usize = match expected_status {
                    Some(status) => diesel::delete(
                        orders::table
                            .filter(orders::order_id.eq(order_id))
                            .filter(orders::status.eq(status.as_str())),
                    )
                    .execute(conn)?,
                    None => diesel::delete(orders::table.filter(orders::order_id.eq(order_id)))
                        .execute(conn)?,
                };

                if deleted == 0 {
                    let current: Option<String> = orders::table
                        .filter(orders::order_id.eq(order_id))
                        .select(orders::status)
                        .first(conn)
                        .optional()?;
                    return Err(current.map_or(
                        PersistenceError::OrderNotFound(order_id),
                        |status| PersistenceError::StaleOrderState { order_id, status },
                    ));
                }
                order_id
            }
        };

        let audit_row: NewAuditEvent =
            NewAuditEvent::encode(&transition.audit_event, Some(order_id), now)?;
        diesel::insert_into(audit_events::table)
            .values(&audit_row)
            .execute(conn)?;
        let event_id: i64 = conn.get_last_insert_rowid()?;

        debug!(order_id, event_id, action = %transition.audit_event.action.name, "Persisted order transition");
        Ok(event_id)
    })
}
}
