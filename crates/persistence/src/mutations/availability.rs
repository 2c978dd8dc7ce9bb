// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen::AvailabilityTransition;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{audit_events, sold_out_items};
use crate::error::PersistenceError;
use crate::mutations::audit::NewAuditEvent;

backend_fn! {
/// Persists a sold out toggle together with its audit event.
///
/// The stored flag is set to the transition's target value, so applying
/// the same transition twice leaves one row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The toggle to persist
/// * `now` - Encoded timestamp
///
/// # Errors
///
/// Returns an error if any write fails. Nothing is written in that case.
pub fn persist_availability_toggle(
    conn: &mut _,
    transition: &AvailabilityTransition,
    now: &str,
) -> Result<i64, PersistenceError> {
    let audit_row: NewAuditEvent = NewAuditEvent::encode(&transition.audit_event, None, now)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        diesel::delete(
            sold_out_items::table.filter(sold_out_items::item_id.eq(&transition.item_id)),
        )
        .execute(conn)?;

        if transition.sold_out {
            diesel::insert_into(sold_out_items::table)
                .values((
                    sold_out_items::item_id.eq(&transition.item_id),
                    sold_out_items::marked_at.eq(now),
                ))
                .execute(conn)?;
        }

        diesel::insert_into(audit_events::table)
            .values(&audit_row)
            .execute(conn)?;
        let event_id: i64 = conn.get_last_insert_rowid()?;

        info!(
            item_id = %transition.item_id,
            sold_out = transition.sold_out,
            event_id,
            "Persisted availability change"
        );
        Ok(event_id)
    })
}
}
