// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen_domain::{Cart, CartLine};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::conversions::{decode_money, decode_quantity};
use crate::diesel_schema::cart_lines;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = cart_lines)]
struct CartLineRow {
    item_id: String,
    name: String,
    unit_price: String,
    quantity: i32,
}

backend_fn! {
/// Loads a session's cart in insertion order.
///
/// A session with no stored lines has an empty cart.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn load_cart(conn: &mut _, session_id: i64) -> Result<Cart, PersistenceError> {
    let rows: Vec<CartLineRow> = cart_lines::table
        .filter(cart_lines::session_id.eq(session_id))
        .order(cart_lines::line_no.asc())
        .select(CartLineRow::as_select())
        .load(conn)?;

    let lines: Vec<CartLine> = rows
        .into_iter()
        .map(|row| {
            Ok(CartLine::new(
                &row.item_id,
                &row.name,
                decode_money(&row.unit_price)?,
                decode_quantity(row.quantity)?,
            ))
        })
        .collect::<Result<_, PersistenceError>>()?;

    Ok(Cart::from_lines(lines))
}
}
