// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use canteen_audit::Cause;
use canteen_domain::Catalog;
use canteen_persistence::{AccountData, Persistence};

use crate::{
    AddToCartRequest, AuthenticatedActor, AuthenticationService, BootstrapAccountsRequest,
    PlaceOrderRequest, PlaceOrderResponse, RegisterRequest, add_to_cart, bootstrap_accounts,
    place_order, register,
};

/// A logged in account as the server would see it after validating the
/// bearer token.
pub struct TestSession {
    pub token: String,
    pub actor: AuthenticatedActor,
    pub account: AccountData,
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

pub fn create_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    bootstrap_accounts(
        &mut persistence,
        &BootstrapAccountsRequest {
            admin_email: String::from("admin@canteen"),
            admin_password: String::from("admin123"),
            seed_demo_user: false,
        },
    )
    .unwrap();
    persistence
}

pub fn login_as(persistence: &mut Persistence, email: &str, password: &str) -> TestSession {
    let (token, actor, account, _session) =
        AuthenticationService::login(persistence, email, password).unwrap();
    TestSession {
        token,
        actor,
        account,
    }
}

pub fn login_admin(persistence: &mut Persistence) -> TestSession {
    login_as(persistence, "admin@canteen", "admin123")
}

/// Registers a customer and logs them in.
pub fn register_customer(persistence: &mut Persistence, email: &str) -> TestSession {
    register(
        persistence,
        &RegisterRequest {
            name: String::from("Juan Dela Cruz"),
            email: email.to_string(),
            password: String::from("user123"),
        },
    )
    .unwrap();
    login_as(persistence, email, "user123")
}

pub fn add(persistence: &mut Persistence, session: &TestSession, item_id: &str, quantity: i64) {
    add_to_cart(
        persistence,
        &Catalog::default_menu(),
        &AddToCartRequest {
            item_id: item_id.to_string(),
            quantity: Some(quantity),
        },
        &session.actor,
    )
    .unwrap();
}

pub fn delivery_request() -> PlaceOrderRequest {
    PlaceOrderRequest {
        recipient_name: String::from("Juan Dela Cruz"),
        contact: String::from("09171234567"),
        address: String::from("Room 204, Engineering Building"),
    }
}

/// Adds the given items and checks out.
pub fn place_test_order(
    persistence: &mut Persistence,
    session: &TestSession,
    items: &[(&str, i64)],
) -> PlaceOrderResponse {
    for (item_id, quantity) in items {
        add(persistence, session, item_id, *quantity);
    }
    place_order(
        persistence,
        &delivery_request(),
        &session.actor,
        &session.account,
        create_test_cause(),
    )
    .unwrap()
}
