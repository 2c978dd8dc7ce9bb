// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen_domain::OrderStatus;

/// A command represents customer or admin intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add units of a catalog item to the cart.
    AddToCart {
        /// The catalog item id.
        item_id: String,
        /// Units to add.
        quantity: u32,
    },
    /// Set the quantity of a cart line; zero or less removes it.
    SetCartQuantity {
        /// The catalog item id.
        item_id: String,
        /// The new quantity.
        quantity: i64,
    },
    /// Remove a cart line.
    RemoveFromCart {
        /// The catalog item id.
        item_id: String,
    },
    /// Empty the cart.
    ClearCart,
    /// Convert the cart into an order.
    PlaceOrder {
        /// Who receives the delivery.
        recipient_name: String,
        /// Phone number or other contact.
        contact: String,
        /// Delivery address.
        address: String,
    },
    /// Move an order to another status.
    SetOrderStatus {
        /// The requested status.
        status: OrderStatus,
    },
    /// Owner withdraws a pending order.
    CancelOrder,
    /// Admin removes an order regardless of status.
    DeleteOrder,
    /// Flip the sold out flag of a catalog item.
    ToggleSoldOut {
        /// The catalog item id.
        item_id: String,
    },
}

impl Command {
    /// The command name, used as the audit action name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "AddToCart",
            Self::SetCartQuantity { .. } => "SetCartQuantity",
            Self::RemoveFromCart { .. } => "RemoveFromCart",
            Self::ClearCart => "ClearCart",
            Self::PlaceOrder { .. } => "PlaceOrder",
            Self::SetOrderStatus { .. } => "SetOrderStatus",
            Self::CancelOrder => "CancelOrder",
            Self::DeleteOrder => "DeleteOrder",
            Self::ToggleSoldOut { .. } => "ToggleSoldOut",
        }
    }
}
