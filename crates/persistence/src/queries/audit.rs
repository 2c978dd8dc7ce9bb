// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use canteen_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    order_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: ActorData = serde_json::from_str(&row.actor_json)?;
        let cause: CauseData = serde_json::from_str(&row.cause_json)?;
        let action: ActionData = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

        let event: Self = Self::new(
            Actor::new(actor.account_id, actor.email, actor.role),
            Cause::new(cause.id, cause.description),
            Action::new(action.name, action.details),
            StateSnapshot::new(before.data),
            StateSnapshot::new(after.data),
        )
        .with_event_id(row.event_id);

        Ok(match row.order_id {
            Some(order_id) => event.with_order_id(order_id),
            None => event,
        })
    }
}

backend_fn! {
/// Retrieves a single audit event.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the event does not exist.
pub fn get_audit_event(conn: &mut _, event_id: i64) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    AuditEvent::try_from(row)
}
}

backend_fn! {
/// Retrieves the audit trail of one order, oldest first.
///
/// Events remain available after the order itself has been removed.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn get_audit_events_for_order(
    conn: &mut _,
    order_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::order_id.eq(order_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AuditEvent::try_from).collect()
}
}
