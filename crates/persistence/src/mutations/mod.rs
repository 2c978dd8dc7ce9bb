// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! Every state-changing operation lives here. Operations that touch more
//! than one table run inside a single database transaction so that a
//! failure leaves no partial writes behind.
//!
//! ## Module Organization
//!
//! - `accounts` — Account and session mutations
//! - `audit` — Audit row encoding shared by the other mutations
//! - `availability` — Sold out toggles
//! - `cart` — Session cart replacement
//! - `orders` — Checkout commit, status changes and order removal

pub mod accounts;
pub mod audit;
pub mod availability;
pub mod cart;
pub mod orders;

pub use accounts::{
    create_account_mysql, create_account_sqlite, create_session_mysql, create_session_sqlite,
    delete_expired_sessions_mysql, delete_expired_sessions_sqlite, delete_session_mysql,
    delete_session_sqlite, update_account_name_mysql, update_account_name_sqlite,
    update_last_login_mysql, update_last_login_sqlite, update_password_mysql,
    update_password_sqlite, update_session_activity_mysql, update_session_activity_sqlite,
};
pub use availability::{persist_availability_toggle_mysql, persist_availability_toggle_sqlite};
pub use cart::{save_cart_mysql, save_cart_sqlite};
pub use orders::{
    PersistCheckoutResult, persist_checkout_mysql, persist_checkout_sqlite,
    persist_order_transition_mysql, persist_order_transition_sqlite,
};
