// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use canteen::CoreError;
use canteen_domain::DomainError;
use canteen_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The operation requires a session and none was presented.
    NotAuthenticated,
    /// Authentication failed (bad credentials or a dead session).
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl ApiError {
    /// Returns the rule name for domain rule violations.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::DomainRuleViolation { rule, .. } => Some(rule.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "You must be logged in"),
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { message, .. } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::ItemNotFound { item_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Menu item"),
            message: format!("No menu item with id '{item_id}'"),
        },
        DomainError::SoldOut { .. } => ApiError::DomainRuleViolation {
            rule: String::from("sold_out"),
            message,
        },
        DomainError::SoldOutAtCheckout { .. } => ApiError::DomainRuleViolation {
            rule: String::from("sold_out_at_checkout"),
            message,
        },
        DomainError::EmptyCart => ApiError::DomainRuleViolation {
            rule: String::from("empty_cart"),
            message,
        },
        DomainError::InvalidDeliveryInfo { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} cannot be empty"),
        },
        DomainError::InvalidQuantity(msg) => ApiError::InvalidInput {
            field: String::from("quantity"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::DuplicateEmail(_) => ApiError::DomainRuleViolation {
            rule: String::from("duplicate_email"),
            message,
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{role}'"),
        },
        DomainError::InvalidCatalog(msg) => ApiError::Internal {
            message: format!("Catalog is invalid: {msg}"),
        },
        DomainError::InvalidOrderStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown order status '{status}'"),
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("invalid_status_transition"),
            message,
        },
        DomainError::InvalidCancelState { .. } => ApiError::DomainRuleViolation {
            rule: String::from("invalid_cancel_state"),
            message,
        },
        DomainError::OrderNotFound(order_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("Order {order_id} does not exist"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotAuthenticated => ApiError::NotAuthenticated,
        CoreError::UnsupportedCommand(_) | CoreError::UnsavedOrder => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Conflicts detected inside a commit transaction are reported with the
/// same rules as their in-memory counterparts. Everything else is an
/// internal failure described by `context`.
///
/// # Arguments
///
/// * `err` - The persistence error
/// * `context` - What was being attempted, e.g. `"load cart"`
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, context: &str) -> ApiError {
    match err {
        PersistenceError::SoldOutConflict { item_ids } => {
            translate_domain_error(DomainError::SoldOutAtCheckout { item_ids })
        }
        PersistenceError::StaleOrderState { order_id, status } => ApiError::DomainRuleViolation {
            rule: String::from("invalid_cancel_state"),
            message: format!("Order {order_id} cannot be cancelled while {status}"),
        },
        PersistenceError::OrderNotFound(order_id) => {
            translate_domain_error(DomainError::OrderNotFound(order_id))
        }
        PersistenceError::DuplicateEmail(email) => {
            translate_domain_error(DomainError::DuplicateEmail(email))
        }
        PersistenceError::AccountNotFound(account) => ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message: format!("Account {account} does not exist"),
        },
        other => ApiError::Internal {
            message: format!("Failed to {context}: {other}"),
        },
    }
}
