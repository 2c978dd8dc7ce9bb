// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the canteen ordering system.
//!
//! This crate sits between transport (HTTP) and the core. It owns
//! authentication, authorization, request/response shapes, and the
//! explicit translation of domain and core errors into API errors.
//! Handlers are synchronous and operate on a single `Persistence`
//! adapter; the server is responsible for serialising access to it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use canteen_domain::Role;
pub use capabilities::{compute_global_capabilities, compute_order_capabilities};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    add_to_cart, admin_menu, bootstrap_accounts, cancel_order, clear_cart, delete_order,
    get_cart, get_menu, get_order, list_all_orders, list_my_orders, login, logout,
    order_history, place_order, register, remove_cart_item, set_cart_quantity, set_order_status,
    toggle_sold_out, update_profile, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AddToCartRequest, AdminMenuResponse, AuditEventInfo, BootstrapAccountsRequest,
    BootstrapAccountsResponse, CancelOrderResponse, Capability, CartLineInfo, CartResponse,
    DeleteOrderResponse, GetMenuResponse, GlobalCapabilities, ListOrdersResponse, LoginRequest,
    LoginResponse, MenuCategoryInfo, MenuItemInfo, OrderCapabilities, OrderHistoryResponse,
    OrderInfo, OrderLineInfo, PlaceOrderRequest, PlaceOrderResponse, RegisterRequest,
    RegisterResponse, SetCartQuantityRequest, SetOrderStatusRequest, SetOrderStatusResponse,
    ToggleSoldOutResponse, UpdateProfileRequest, WhoAmIResponse,
};
