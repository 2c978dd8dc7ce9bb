// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The operation requires an active session.
    NotAuthenticated,
    /// The command was routed to an apply function that does not handle it.
    UnsupportedCommand(&'static str),
    /// The order has not been persisted and has no id.
    UnsavedOrder,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotAuthenticated => write!(f, "You must be logged in"),
            Self::UnsupportedCommand(name) => {
                write!(f, "Command {name} is not supported here")
            }
            Self::UnsavedOrder => write!(f, "Order has not been saved"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
