// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order ledger queries.
//!
//! Listings are newest first. Lines are loaded in one query per listing
//! and grouped in memory.

use canteen_domain::{DeliveryInfo, Order, OrderLine, OrderStatus};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::collections::HashMap;

use crate::conversions::{decode_money, decode_quantity, decode_timestamp};
use crate::diesel_schema::{order_lines, orders};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
struct OrderRow {
    order_id: i64,
    owner_account_id: i64,
    owner_email: String,
    recipient_name: String,
    contact: String,
    address: String,
    items_total: String,
    delivery_fee: String,
    total: String,
    payment_method: String,
    status: String,
    created_at: String,
    updated_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_lines)]
struct OrderLineRow {
    order_id: i64,
    item_id: String,
    name: String,
    unit_price: String,
    quantity: i32,
}

fn decode_line(row: &OrderLineRow) -> Result<OrderLine, PersistenceError> {
    Ok(OrderLine::new(
        &row.item_id,
        &row.name,
        decode_money(&row.unit_price)?,
        decode_quantity(row.quantity)?,
    ))
}

fn decode_order(row: OrderRow, lines: Vec<OrderLine>) -> Result<Order, PersistenceError> {
    let delivery: DeliveryInfo =
        DeliveryInfo::new(&row.recipient_name, &row.contact, &row.address)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let status: OrderStatus = row
        .status
        .parse::<OrderStatus>()
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    Ok(Order::with_id(
        row.order_id,
        row.owner_account_id,
        row.owner_email,
        delivery,
        lines,
        decode_money(&row.items_total)?,
        decode_money(&row.delivery_fee)?,
        decode_money(&row.total)?,
        row.payment_method,
        status,
        decode_timestamp(&row.created_at)?,
        decode_timestamp(&row.updated_at)?,
    ))
}

/// Pairs order rows with their lines, keeping the row order.
fn assemble(
    rows: Vec<OrderRow>,
    line_rows: Vec<OrderLineRow>,
) -> Result<Vec<Order>, PersistenceError> {
    let mut lines_by_order: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for line_row in &line_rows {
        lines_by_order
            .entry(line_row.order_id)
            .or_default()
            .push(decode_line(line_row)?);
    }

    rows.into_iter()
        .map(|row| {
            let lines: Vec<OrderLine> = lines_by_order.remove(&row.order_id).unwrap_or_default();
            decode_order(row, lines)
        })
        .collect()
}

backend_fn! {
/// Retrieves one order with its lines.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded. Returns `Ok(None)` if the order does not exist.
pub fn get_order(conn: &mut _, order_id: i64) -> Result<Option<Order>, PersistenceError> {
    let row: Option<OrderRow> = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let line_rows: Vec<OrderLineRow> = order_lines::table
        .filter(order_lines::order_id.eq(order_id))
        .order(order_lines::line_no.asc())
        .select(OrderLineRow::as_select())
        .load(conn)?;

    let lines: Vec<OrderLine> = line_rows
        .iter()
        .map(decode_line)
        .collect::<Result<_, _>>()?;

    decode_order(row, lines).map(Some)
}
}

backend_fn! {
/// Lists the orders of one account, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_orders_for_owner(
    conn: &mut _,
    owner_account_id: i64,
) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .filter(orders::owner_account_id.eq(owner_account_id))
        .order(orders::order_id.desc())
        .select(OrderRow::as_select())
        .load(conn)?;

    let ids: Vec<i64> = rows.iter().map(|r| r.order_id).collect();
    let line_rows: Vec<OrderLineRow> = order_lines::table
        .filter(order_lines::order_id.eq_any(ids))
        .order((order_lines::order_id.asc(), order_lines::line_no.asc()))
        .select(OrderLineRow::as_select())
        .load(conn)?;

    assemble(rows, line_rows)
}
}

backend_fn! {
/// Lists every order, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_all_orders(conn: &mut _) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .order(orders::order_id.desc())
        .select(OrderRow::as_select())
        .load(conn)?;

    let line_rows: Vec<OrderLineRow> = order_lines::table
        .order((order_lines::order_id.asc(), order_lines::line_no.asc()))
        .select(OrderLineRow::as_select())
        .load(conn)?;

    assemble(rows, line_rows)
}
}
