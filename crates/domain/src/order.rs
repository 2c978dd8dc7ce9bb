// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Orders and the order status lifecycle.
//!
//! Status changes are admin-initiated. Admins may move an order between
//! any two states except that a delivered order is never reopened.
//! Owners may only cancel while the order is still pending.

use crate::cart::{Cart, CartLine, DELIVERY_FEE};
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The only payment method offered.
pub const PAYMENT_METHOD_COD: &str = "COD";

/// Order status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen
    Pending,
    /// Being cooked
    Preparing,
    /// With the rider
    #[serde(rename = "Out for Delivery", alias = "OutForDelivery")]
    OutForDelivery,
    /// Handed over to the customer
    Delivered,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// Returns the display label of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }

    /// Parses a status, ignoring case, spaces and underscores.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOrderStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "outfordelivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            _ => Err(DomainError::InvalidOrderStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Returns true if the owner may still cancel the order.
    #[must_use]
    pub const fn can_owner_cancel(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Validates an admin status change.
    ///
    /// Any move is allowed, including jumps and moving backwards, except
    /// leaving `Delivered`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` when reopening a
    /// delivered order.
    pub fn validate_admin_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() && new_status != *self {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("a delivered order cannot be reopened"),
            });
        }
        Ok(())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recipient details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryInfo {
    recipient_name: String,
    contact: String,
    address: String,
}

impl DeliveryInfo {
    /// Creates delivery info from raw form input.
    ///
    /// All fields are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDeliveryInfo` naming the first blank
    /// field.
    pub fn new(recipient_name: &str, contact: &str, address: &str) -> Result<Self, DomainError> {
        let recipient_name: &str = recipient_name.trim();
        let contact: &str = contact.trim();
        let address: &str = address.trim();

        if recipient_name.is_empty() {
            return Err(DomainError::InvalidDeliveryInfo {
                field: "recipient_name",
            });
        }
        if contact.is_empty() {
            return Err(DomainError::InvalidDeliveryInfo { field: "contact" });
        }
        if address.is_empty() {
            return Err(DomainError::InvalidDeliveryInfo { field: "address" });
        }

        Ok(Self {
            recipient_name: recipient_name.to_string(),
            contact: contact.to_string(),
            address: address.to_string(),
        })
    }

    #[must_use]
    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// A line of an order, copied from the cart at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    item_id: String,
    name: String,
    unit_price: Decimal,
    quantity: u32,
}

impl OrderLine {
    #[must_use]
    pub fn new(item_id: &str, name: &str, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            name: name.to_string(),
            unit_price,
            quantity,
        }
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self::new(line.item_id(), line.name(), line.price(), line.quantity())
    }
}

/// A placed order.
///
/// Totals are fixed when the order is placed and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// `None` until the order has been persisted.
    order_id: Option<i64>,
    owner_id: i64,
    owner_email: String,
    delivery: DeliveryInfo,
    lines: Vec<OrderLine>,
    items_total: Decimal,
    delivery_fee: Decimal,
    total: Decimal,
    payment_method: String,
    status: OrderStatus,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Order {
    /// Snapshots a cart into a new pending order.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - The account placing the order
    /// * `owner_email` - The account email at the time of ordering
    /// * `delivery` - Validated delivery details
    /// * `cart` - The cart to copy lines from
    /// * `now` - Placement timestamp
    #[must_use]
    pub fn place(
        owner_id: i64,
        owner_email: &str,
        delivery: DeliveryInfo,
        cart: &Cart,
        now: OffsetDateTime,
    ) -> Self {
        let items_total: Decimal = cart.subtotal();
        Self {
            order_id: None,
            owner_id,
            owner_email: owner_email.to_string(),
            delivery,
            lines: cart.lines().iter().map(OrderLine::from).collect(),
            items_total,
            delivery_fee: DELIVERY_FEE,
            total: items_total + DELIVERY_FEE,
            payment_method: String::from(PAYMENT_METHOD_COD),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a stored order.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn with_id(
        order_id: i64,
        owner_id: i64,
        owner_email: String,
        delivery: DeliveryInfo,
        lines: Vec<OrderLine>,
        items_total: Decimal,
        delivery_fee: Decimal,
        total: Decimal,
        payment_method: String,
        status: OrderStatus,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            order_id: Some(order_id),
            owner_id,
            owner_email,
            delivery,
            lines,
            items_total,
            delivery_fee,
            total,
            payment_method,
            status,
            created_at,
            updated_at,
        }
    }

    /// Returns the same order carrying its assigned id.
    #[must_use]
    pub fn assigned(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Returns the same order in a new status.
    #[must_use]
    pub fn with_status(mut self, status: OrderStatus, now: OffsetDateTime) -> Self {
        self.status = status;
        self.updated_at = now;
        self
    }

    #[must_use]
    pub const fn order_id(&self) -> Option<i64> {
        self.order_id
    }

    #[must_use]
    pub const fn owner_id(&self) -> i64 {
        self.owner_id
    }

    #[must_use]
    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    #[must_use]
    pub const fn delivery(&self) -> &DeliveryInfo {
        &self.delivery
    }

    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    #[must_use]
    pub const fn items_total(&self) -> Decimal {
        self.items_total
    }

    #[must_use]
    pub const fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }

    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    #[must_use]
    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// Returns true if the given account placed this order.
    #[must_use]
    pub const fn is_owned_by(&self, account_id: i64) -> bool {
        self.owner_id == account_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label_round_trip() {
        for status in OrderStatus::ALL {
            let s: &str = status.as_str();
            match OrderStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status label: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_status_parse_accepts_variant_spellings() {
        assert_eq!(
            "OutForDelivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert_eq!(
            "out_for_delivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert_eq!("PENDING".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(OrderStatus::parse_str("cancelled").is_err());
    }

    #[test]
    fn test_admin_may_jump_forward_and_back() {
        assert!(
            OrderStatus::Pending
                .validate_admin_transition(OrderStatus::Delivered)
                .is_ok()
        );
        assert!(
            OrderStatus::OutForDelivery
                .validate_admin_transition(OrderStatus::Pending)
                .is_ok()
        );
        assert!(
            OrderStatus::Preparing
                .validate_admin_transition(OrderStatus::Preparing)
                .is_ok()
        );
    }

    #[test]
    fn test_delivered_cannot_be_reopened() {
        for target in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
        ] {
            assert!(matches!(
                OrderStatus::Delivered.validate_admin_transition(target),
                Err(DomainError::InvalidStatusTransition { .. })
            ));
        }
        assert!(
            OrderStatus::Delivered
                .validate_admin_transition(OrderStatus::Delivered)
                .is_ok()
        );
    }

    #[test]
    fn test_only_pending_can_be_cancelled_by_owner() {
        assert!(OrderStatus::Pending.can_owner_cancel());
        assert!(!OrderStatus::Preparing.can_owner_cancel());
        assert!(!OrderStatus::OutForDelivery.can_owner_cancel());
        assert!(!OrderStatus::Delivered.can_owner_cancel());
    }

    #[test]
    fn test_status_serde_uses_labels() {
        let json: Result<String, serde_json::Error> =
            serde_json::to_string(&OrderStatus::OutForDelivery);
        assert_eq!(json.ok().as_deref(), Some("\"Out for Delivery\""));

        let parsed: Result<OrderStatus, serde_json::Error> =
            serde_json::from_str("\"OutForDelivery\"");
        assert_eq!(parsed.ok(), Some(OrderStatus::OutForDelivery));
    }

    #[test]
    fn test_delivery_info_trims_and_validates() {
        let info: Result<DeliveryInfo, DomainError> =
            DeliveryInfo::new("  Juan  ", " 0917 ", " Room 204 ");
        let Ok(info) = info else {
            panic!("delivery info should be valid");
        };
        assert_eq!(info.recipient_name(), "Juan");
        assert_eq!(info.contact(), "0917");
        assert_eq!(info.address(), "Room 204");

        assert_eq!(
            DeliveryInfo::new("Juan", "   ", "Room 204"),
            Err(DomainError::InvalidDeliveryInfo { field: "contact" })
        );
        assert_eq!(
            DeliveryInfo::new("", "0917", ""),
            Err(DomainError::InvalidDeliveryInfo {
                field: "recipient_name"
            })
        );
    }
}
