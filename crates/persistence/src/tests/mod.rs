// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod checkout_tests;

use crate::Persistence;
use canteen_audit::{Actor, Cause};
use canteen_domain::{AvailabilitySet, Cart, Catalog, Email, Role, Session};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_admin_actor() -> Actor {
    Actor::new(
        Some(1),
        String::from("admin@canteen"),
        String::from("admin"),
    )
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 12:30 UTC)
}

/// Registers a customer and opens a session for it.
///
/// Returns the domain session and the stored session id.
pub fn create_customer_session(persistence: &mut Persistence, email: &str) -> (Session, i64) {
    let email = Email::parse(email).unwrap();
    let account_id = persistence
        .create_account("Test User", &email, "user123", Role::User, test_now())
        .unwrap();
    let session_id = persistence
        .create_session(
            &format!("token-{account_id}"),
            account_id,
            test_now(),
            test_now() + time::Duration::hours(8),
        )
        .unwrap();

    let session = Session {
        account_id,
        name: String::from("Test User"),
        email: email.value().to_string(),
        role: Role::User,
    };
    (session, session_id)
}

/// Builds a cart from `(item_id, quantity)` pairs on the default menu.
pub fn cart_with(items: &[(&str, u32)]) -> Cart {
    let catalog = Catalog::default_menu();
    let availability = AvailabilitySet::new();
    let mut cart = Cart::new();
    for (item_id, quantity) in items {
        cart.add(&catalog, &availability, item_id, *quantity).unwrap();
    }
    cart
}
