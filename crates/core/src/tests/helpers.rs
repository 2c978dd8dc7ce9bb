// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen_audit::{Actor, Cause};
use canteen_domain::{
    AvailabilitySet, Cart, Catalog, DeliveryInfo, Order, OrderStatus, Role, Session,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_session() -> Session {
    Session {
        account_id: 2,
        name: String::from("Test User"),
        email: String::from("user@demo"),
        role: Role::User,
    }
}

pub fn create_test_admin_actor() -> Actor {
    Actor::new(Some(1), String::from("admin@canteen"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 12:30 UTC)
}

pub fn cart_with(catalog: &Catalog, items: &[(&str, u32)]) -> Cart {
    let availability: AvailabilitySet = AvailabilitySet::new();
    let mut cart: Cart = Cart::new();
    for (item_id, quantity) in items {
        cart.add(catalog, &availability, item_id, *quantity)
            .expect("test item should be addable");
    }
    cart
}

pub fn create_stored_order(status: OrderStatus) -> Order {
    let catalog: Catalog = Catalog::default_menu();
    let cart: Cart = cart_with(&catalog, &[("f8", 3)]);
    let delivery: DeliveryInfo =
        DeliveryInfo::new("Test User", "09171234567", "Room 204").expect("valid delivery");
    Order::place(2, "user@demo", delivery, &cart, test_now())
        .assigned(17)
        .with_status(status, test_now())
}
