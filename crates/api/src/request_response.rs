// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.
//!
//! Money fields are `Decimal` and serialize as decimal strings.
//! Timestamps are RFC 3339 strings in UTC.

use rust_decimal::Decimal;

// ============================================================================
// Accounts
// ============================================================================

/// API request to register a customer account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// The display name.
    pub name: String,
    /// The email (trimmed and lowercased on registration).
    pub email: String,
    /// The password.
    pub password: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
    /// The new account id.
    pub account_id: i64,
    /// The stored display name.
    pub name: String,
    /// The stored (normalised) email.
    pub email: String,
    /// The account role. Always `user` for self registration.
    pub role: String,
    /// A success message.
    pub message: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The account email.
    pub email: String,
    /// The account password.
    pub password: String,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    /// The account id.
    pub account_id: i64,
    /// The display name.
    pub name: String,
    /// The email.
    pub email: String,
    /// The account role.
    pub role: String,
    /// Session expiration timestamp.
    pub expires_at: String,
}

/// API response for the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The account id.
    pub account_id: i64,
    /// The display name.
    pub name: String,
    /// The email.
    pub email: String,
    /// The account role.
    pub role: String,
    /// Global capabilities for this account.
    pub capabilities: GlobalCapabilities,
}

/// API request to update the caller's own profile.
///
/// Missing or blank fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// A new display name.
    #[serde(default)]
    pub name: Option<String>,
    /// A new password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Startup seeding of the account directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAccountsRequest {
    /// Email of the admin account seeded into an empty directory.
    pub admin_email: String,
    /// Password of the seeded admin.
    pub admin_password: String,
    /// Also seed the demo customer account.
    pub seed_demo_user: bool,
}

/// Outcome of startup seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAccountsResponse {
    /// The seeded admin account, if the directory was empty.
    pub admin_account_id: Option<i64>,
    /// The seeded demo account, if requested and absent.
    pub demo_account_id: Option<i64>,
}

// ============================================================================
// Menu
// ============================================================================

/// A catalog item with its current availability.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MenuItemInfo {
    /// The item id.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The unit price.
    pub price: Decimal,
    /// The category key (`budget`, `food`, `drink`).
    pub category: String,
    /// Whether the item is currently sold out.
    pub sold_out: bool,
}

/// One menu category and its items, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MenuCategoryInfo {
    /// The category key.
    pub category: String,
    /// The human readable category label.
    pub label: String,
    /// Items in this category.
    pub items: Vec<MenuItemInfo>,
}

/// API response for the public menu.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetMenuResponse {
    /// Categories in display order.
    pub categories: Vec<MenuCategoryInfo>,
    /// Flat fee added to every order.
    pub delivery_fee: Decimal,
}

/// API response for the admin menu view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdminMenuResponse {
    /// Every catalog item with its sold out flag.
    pub items: Vec<MenuItemInfo>,
    /// Number of items currently sold out.
    pub sold_out_count: usize,
}

/// API response for a sold out toggle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToggleSoldOutResponse {
    /// The toggled item id.
    pub item_id: String,
    /// The item name.
    pub name: String,
    /// Whether the item is sold out after the toggle.
    pub sold_out: bool,
    /// The audit event recording the toggle.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Cart
// ============================================================================

/// API request to add an item to the cart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddToCartRequest {
    /// The catalog item id.
    pub item_id: String,
    /// Units to add. Defaults to 1.
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// API request to set a cart line quantity.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetCartQuantityRequest {
    /// The new quantity. Zero or less removes the line.
    pub quantity: i64,
}

/// A cart line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CartLineInfo {
    /// The catalog item id.
    pub item_id: String,
    /// The item name captured when the line was created.
    pub name: String,
    /// The unit price captured when the line was created.
    pub price: Decimal,
    /// Units in the cart.
    pub quantity: u32,
    /// `price * quantity`.
    pub line_total: Decimal,
}

/// API response describing the caller's cart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CartResponse {
    /// Lines in insertion order.
    pub lines: Vec<CartLineInfo>,
    /// Total units across all lines.
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Flat delivery fee.
    pub delivery_fee: Decimal,
    /// Subtotal plus delivery fee.
    pub grand_total: Decimal,
}

// ============================================================================
// Orders
// ============================================================================

/// API request to place an order from the caller's cart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaceOrderRequest {
    /// Who receives the delivery.
    pub recipient_name: String,
    /// Phone number or other contact.
    pub contact: String,
    /// Delivery address.
    pub address: String,
}

/// An order line snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderLineInfo {
    /// The catalog item id.
    pub item_id: String,
    /// The item name at checkout.
    pub name: String,
    /// The unit price at checkout.
    pub unit_price: Decimal,
    /// Units ordered.
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub line_total: Decimal,
}

/// Capabilities for a specific order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderCapabilities {
    /// Whether the caller can cancel this order.
    pub can_cancel: Capability,
    /// Whether the caller can change the status of this order.
    pub can_set_status: Capability,
    /// Whether the caller can delete this order.
    pub can_delete: Capability,
}

/// An order as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderInfo {
    /// The order id.
    pub order_id: i64,
    /// The owning account.
    pub owner_id: i64,
    /// The owner's email at checkout.
    pub owner_email: String,
    /// Who receives the delivery.
    pub recipient_name: String,
    /// Phone number or other contact.
    pub contact: String,
    /// Delivery address.
    pub address: String,
    /// Line snapshots.
    pub lines: Vec<OrderLineInfo>,
    /// Sum of line totals.
    pub items_total: Decimal,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Items total plus delivery fee.
    pub total: Decimal,
    /// Always `COD`.
    pub payment_method: String,
    /// Status label.
    pub status: String,
    /// Placement timestamp.
    pub created_at: String,
    /// Last status change timestamp.
    pub updated_at: String,
    /// What the caller may do with this order.
    pub capabilities: OrderCapabilities,
}

/// API response for a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaceOrderResponse {
    /// The new order.
    pub order: OrderInfo,
    /// The audit event recording the checkout.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for order listings, newest first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListOrdersResponse {
    /// The orders.
    pub orders: Vec<OrderInfo>,
}

/// API request to change an order's status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetOrderStatusRequest {
    /// The status label, e.g. `Preparing` or `Out for Delivery`.
    pub status: String,
}

/// API response for a status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetOrderStatusResponse {
    /// The updated order.
    pub order: OrderInfo,
    /// The status before the change.
    pub previous_status: String,
    /// The audit event recording the change.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for an owner cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelOrderResponse {
    /// The cancelled (removed) order.
    pub order_id: i64,
    /// The audit event recording the cancellation.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for an admin deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteOrderResponse {
    /// The deleted order.
    pub order_id: i64,
    /// The status the order had when deleted.
    pub previous_status: String,
    /// The audit event recording the deletion.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// A recorded audit event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The event id.
    pub event_id: i64,
    /// The order the event concerns.
    pub order_id: Option<i64>,
    /// The acting account, if any.
    pub actor_account_id: Option<i64>,
    /// The acting email, or `system`.
    pub actor_email: String,
    /// The acting role.
    pub actor_role: String,
    /// The cause id.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// State before.
    pub before: String,
    /// State after.
    pub after: String,
}

/// API response for an order's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderHistoryResponse {
    /// The order.
    pub order_id: i64,
    /// Events in the order they were recorded.
    pub events: Vec<AuditEventInfo>,
}

// ============================================================================
// Capabilities
// ============================================================================

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// Global capabilities for an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlobalCapabilities {
    /// Whether the account can fill a cart and check out.
    pub can_place_orders: Capability,
    /// Whether the account can see every order.
    pub can_view_all_orders: Capability,
    /// Whether the account can change order status and delete orders.
    pub can_manage_orders: Capability,
    /// Whether the account can toggle menu availability.
    pub can_manage_menu: Capability,
}
