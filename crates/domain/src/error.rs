// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::order::OrderStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The item id does not exist in the catalog.
    ItemNotFound {
        /// The requested item id.
        item_id: String,
    },
    /// The item is currently marked sold out and cannot be added.
    SoldOut {
        /// The sold out item id.
        item_id: String,
    },
    /// One or more cart lines became sold out before checkout committed.
    SoldOutAtCheckout {
        /// The offending item ids, in cart order.
        item_ids: Vec<String>,
    },
    /// Checkout was attempted with no lines in the cart.
    EmptyCart,
    /// A delivery field is blank after trimming.
    InvalidDeliveryInfo {
        /// The name of the blank field.
        field: &'static str,
    },
    /// Quantity is zero, negative, or out of range.
    InvalidQuantity(String),
    /// Account name is empty or invalid.
    InvalidName(String),
    /// Email is empty or malformed.
    InvalidEmail(String),
    /// An account with this email already exists.
    DuplicateEmail(String),
    /// Role string is not recognized.
    InvalidRole(String),
    /// Catalog definition is malformed.
    InvalidCatalog(String),
    /// Status string is not recognized.
    InvalidOrderStatus {
        /// The unrecognized status value.
        status: String,
    },
    /// Status change is not permitted.
    InvalidStatusTransition {
        /// The current status label.
        from: String,
        /// The requested status label.
        to: String,
        /// Why the change was rejected.
        reason: String,
    },
    /// The order can no longer be cancelled by its owner.
    InvalidCancelState {
        /// The order.
        order_id: i64,
        /// The status the order was in.
        status: OrderStatus,
    },
    /// The order does not exist.
    OrderNotFound(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound { item_id } => {
                write!(f, "Item '{item_id}' not found in catalog")
            }
            Self::SoldOut { item_id } => write!(f, "Item '{item_id}' is sold out"),
            Self::SoldOutAtCheckout { item_ids } => {
                write!(
                    f,
                    "Some items in your cart are now sold out: {}",
                    item_ids.join(", ")
                )
            }
            Self::EmptyCart => write!(f, "Cart is empty"),
            Self::InvalidDeliveryInfo { field } => {
                write!(f, "Invalid delivery info: {field} cannot be empty")
            }
            Self::InvalidQuantity(msg) => write!(f, "Invalid quantity: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "An account with email '{email}' already exists")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidCatalog(msg) => write!(f, "Invalid catalog: {msg}"),
            Self::InvalidOrderStatus { status } => {
                write!(f, "Invalid order status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change order status from {from} to {to}: {reason}")
            }
            Self::InvalidCancelState { order_id, status } => {
                write!(
                    f,
                    "Order {order_id} cannot be cancelled while {}",
                    status.as_str()
                )
            }
            Self::OrderNotFound(order_id) => write!(f, "Order {order_id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
