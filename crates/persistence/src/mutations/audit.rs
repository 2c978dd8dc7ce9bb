// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event encoding.
//!
//! Audit rows are always written inside the transaction of the change
//! they describe, so this module only builds the insertable row.

use canteen_audit::AuditEvent;
use diesel::prelude::*;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// An audit event ready to insert.
#[derive(Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub order_id: Option<i64>,
    pub actor_account_id: Option<i64>,
    pub actor_email: String,
    pub action_name: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

impl NewAuditEvent {
    /// Serializes an audit event.
    ///
    /// # Arguments
    ///
    /// * `event` - The event to encode
    /// * `order_id` - Overrides the event's order scope when set
    /// * `created_at` - Encoded timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if any component fails to serialize.
    pub fn encode(
        event: &AuditEvent,
        order_id: Option<i64>,
        created_at: &str,
    ) -> Result<Self, PersistenceError> {
        let actor: ActorData = ActorData {
            account_id: event.actor.account_id,
            email: event.actor.email.clone(),
            role: event.actor.role.clone(),
        };
        let cause: CauseData = CauseData {
            id: event.cause.id.clone(),
            description: event.cause.description.clone(),
        };
        let action: ActionData = ActionData {
            name: event.action.name.clone(),
            details: event.action.details.clone(),
        };
        let before: StateSnapshotData = StateSnapshotData {
            data: event.before.data.clone(),
        };
        let after: StateSnapshotData = StateSnapshotData {
            data: event.after.data.clone(),
        };

        Ok(Self {
            order_id: order_id.or(event.order_id),
            actor_account_id: event.actor.account_id,
            actor_email: event.actor.email.clone(),
            action_name: event.action.name.clone(),
            actor_json: serde_json::to_string(&actor)?,
            cause_json: serde_json::to_string(&cause)?,
            action_json: serde_json::to_string(&action)?,
            before_snapshot_json: serde_json::to_string(&before)?,
            after_snapshot_json: serde_json::to_string(&after)?,
            created_at: created_at.to_string(),
        })
    }
}
