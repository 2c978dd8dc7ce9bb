// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use canteen_domain::Session;

/// Represents the entity performing an action.
///
/// Customers and admins are identified by their account. Startup seeding
/// and other unattended changes use the system actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The account that acted, if any.
    pub account_id: Option<i64>,
    /// Email of the account, or `system`.
    pub email: String,
    /// Role at the time of the action (`user`, `admin`, `system`).
    pub role: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The acting account, `None` for the system
    /// * `email` - The account email
    /// * `role` - The role the action was performed under
    #[must_use]
    pub const fn new(account_id: Option<i64>, email: String, role: String) -> Self {
        Self {
            account_id,
            email,
            role,
        }
    }

    /// The actor used for changes nobody requested directly.
    #[must_use]
    pub fn system() -> Self {
        Self::new(None, String::from("system"), String::from("system"))
    }
}

impl From<&Session> for Actor {
    fn from(session: &Session) -> Self {
        Self::new(
            Some(session.account_id),
            session.email.clone(),
            session.role.as_str().to_string(),
        )
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`PlaceOrder`", "`ToggleSoldOut`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A rendering of the affected state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot of state that does not exist (before creation, after removal).
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            data: String::new(),
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful order or availability change produces exactly one
/// audit event, persisted in the same transaction as the change. Events
/// outlive the orders they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The persisted event id, `None` until stored.
    pub event_id: Option<i64>,
    /// The order this event concerns, if any.
    pub order_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            order_id: None,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Scopes the event to an order.
    ///
    /// Order ids are assigned on insert, so checkout events are scoped
    /// after the order row exists.
    #[must_use]
    pub const fn with_order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Attaches the id assigned by the store.
    #[must_use]
    pub const fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
