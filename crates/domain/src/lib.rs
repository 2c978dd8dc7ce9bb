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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod account;
mod availability;
mod cart;
mod catalog;
mod error;
mod order;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use account::{Account, Email, Role, Session};
pub use availability::AvailabilitySet;
pub use cart::{Cart, CartLine, DELIVERY_FEE, MAX_QUANTITY};
pub use catalog::{Catalog, CatalogItem, Category};
pub use error::DomainError;
pub use order::{DeliveryInfo, Order, OrderLine, OrderStatus, PAYMENT_METHOD_COD};
pub use validation::{MAX_NAME_LENGTH, validate_account_name, validate_add_quantity};
