// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! All read-only queries. Each is generated in a `_sqlite` and a `_mysql`
//! version; the `Persistence` adapter in `lib.rs` dispatches to the one
//! matching the active connection.
//!
//! ## Module Organization
//!
//! - `accounts` — Account and session lookups
//! - `audit` — Audit event retrieval
//! - `availability` — Sold out set
//! - `cart` — Stored session carts
//! - `orders` — Order ledger reads

pub mod accounts;
pub mod audit;
pub mod availability;
pub mod cart;
pub mod orders;

pub use accounts::{
    count_accounts_mysql, count_accounts_sqlite, count_admin_accounts_mysql,
    count_admin_accounts_sqlite, get_account_by_email_mysql, get_account_by_email_sqlite,
    get_account_by_id_mysql, get_account_by_id_sqlite, get_session_by_token_mysql,
    get_session_by_token_sqlite,
};
pub use audit::{
    get_audit_event_mysql, get_audit_event_sqlite, get_audit_events_for_order_mysql,
    get_audit_events_for_order_sqlite,
};
pub use availability::{load_availability_mysql, load_availability_sqlite};
pub use cart::{load_cart_mysql, load_cart_sqlite};
pub use orders::{
    get_order_mysql, get_order_sqlite, list_all_orders_mysql, list_all_orders_sqlite,
    list_orders_for_owner_mysql, list_orders_for_owner_sqlite,
};
