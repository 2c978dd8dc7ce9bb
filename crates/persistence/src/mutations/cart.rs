// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen_domain::{Cart, CartLine};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::conversions::{encode_line_no, encode_money, encode_quantity};
use crate::diesel_schema::cart_lines;
use crate::error::PersistenceError;

/// A cart line ready to insert.
#[derive(Insertable)]
#[diesel(table_name = cart_lines)]
struct NewCartLine<'a> {
    session_id: i64,
    line_no: i32,
    item_id: &'a str,
    name: &'a str,
    unit_price: String,
    quantity: i32,
}

impl<'a> NewCartLine<'a> {
    fn encode(session_id: i64, index: usize, line: &'a CartLine) -> Result<Self, PersistenceError> {
        Ok(Self {
            session_id,
            line_no: encode_line_no(index)?,
            item_id: line.item_id(),
            name: line.name(),
            unit_price: encode_money(line.price()),
            quantity: encode_quantity(line.quantity())?,
        })
    }
}

backend_fn! {
/// Replaces the stored cart of a session.
///
/// # Errors
///
/// Returns an error if any write fails. The previous cart is kept in
/// that case.
pub fn save_cart(conn: &mut _, session_id: i64, cart: &Cart) -> Result<(), PersistenceError> {
    let rows: Vec<NewCartLine<'_>> = cart
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| NewCartLine::encode(session_id, index, line))
        .collect::<Result<_, _>>()?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        diesel::delete(cart_lines::table.filter(cart_lines::session_id.eq(session_id)))
            .execute(conn)?;

        for row in &rows {
            diesel::insert_into(cart_lines::table).values(row).execute(conn)?;
        }
        Ok(())
    })?;

    debug!(session_id, lines = rows.len(), "Saved cart");
    Ok(())
}
}
