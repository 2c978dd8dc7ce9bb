// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence and the
/// bootstrap administrator.
fn create_test_app_state() -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    bootstrap_accounts(
        &mut persistence,
        &BootstrapAccountsRequest {
            admin_email: String::from("admin@canteen"),
            admin_password: String::from("admin123"),
            seed_demo_user: true,
        },
    )
    .expect("Failed to bootstrap accounts");

    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        catalog: Arc::new(Catalog::default_menu()),
        live_events: Arc::new(LiveEventBroadcaster::new()),
    }
}

/// Sends a request and returns the status with the decoded JSON body.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK, "login failed: {body}");
    body["session_token"].as_str().unwrap().to_string()
}

async fn add_item(app: &Router, token: &str, item_id: &str, quantity: i64) {
    let (status, body) = send(
        app,
        "POST",
        "/cart/items",
        Some(token),
        Some(json!({ "item_id": item_id, "quantity": quantity })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK, "add to cart failed: {body}");
}

fn delivery_body() -> Value {
    json!({
        "recipient_name": "Juan Dela Cruz",
        "contact": "09171234567",
        "address": "Room 204, Engineering Building",
    })
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().map_or_else(
        || value.to_string().parse().unwrap(),
        |s| s.parse().unwrap(),
    )
}

#[tokio::test]
async fn test_health_probes_database() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["menu_items"].as_u64().unwrap(),
        Catalog::default_menu().len() as u64
    );
}

#[tokio::test]
async fn test_register_login_and_whoami() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "name": "Maria", "email": "Maria@Example.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["email"], "maria@example.com");

    let token: String = login_token(&app, "maria@example.com", "secret").await;
    let (status, me) = send(&app, "GET", "/auth/me", Some(&token), None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(me["name"], "Maria");
    assert_eq!(me["role"], "user");
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "name": "Someone", "email": "USER@demo", "password": "secret" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["error"], true);
    assert_eq!(body["rule"], "duplicate_email");
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "user@demo", "password": "nope" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert!(body.get("rule").is_none());
}

#[tokio::test]
async fn test_cart_requires_session() {
    let app: Router = build_router(create_test_app_state());

    let (missing, _) = send(&app, "GET", "/cart", None, None).await;
    let (bogus, _) = send(&app, "GET", "/cart", Some("session_0_0"), None).await;

    assert_eq!(missing, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(bogus, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app, "user@demo", "user123").await;

    let (status, _) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_menu_is_public() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, "GET", "/menu", None, None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 3);
    assert_eq!(decimal(&body["delivery_fee"]), Decimal::from(10));
}

#[tokio::test]
async fn test_cart_edit_routes() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app, "user@demo", "user123").await;
    add_item(&app, &token, "f8", 2).await;
    add_item(&app, &token, "d1", 1).await;

    let (status, cart) = send(
        &app,
        "PUT",
        "/cart/items/f8",
        Some(&token),
        Some(json!({ "quantity": 3 })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(cart["item_count"], 4);

    let (status, cart) = send(&app, "DELETE", "/cart/items/d1", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(decimal(&cart["subtotal"]), Decimal::from(60));
    assert_eq!(decimal(&cart["grand_total"]), Decimal::from(70));

    let (status, cart) = send(&app, "DELETE", "/cart", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert!(cart["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app, "user@demo", "user123").await;

    let (status, body) = send(
        &app,
        "POST",
        "/cart/items",
        Some(&token),
        Some(json!({ "item_id": "zz" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_place_order_broadcasts_and_returns_totals() {
    let app_state: AppState = create_test_app_state();
    let mut events = app_state.live_events.subscribe();
    let app: Router = build_router(app_state);
    let token: String = login_token(&app, "user@demo", "user123").await;
    add_item(&app, &token, "f8", 3).await;

    let (status, body) = send(&app, "POST", "/orders", Some(&token), Some(delivery_body())).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["order"]["status"], "Pending");
    assert_eq!(decimal(&body["order"]["total"]), Decimal::from(70));

    let order_id: i64 = body["order"]["order_id"].as_i64().unwrap();
    assert_eq!(events.try_recv().unwrap(), LiveEvent::OrderPlaced { order_id });

    let (status, mine) = send(&app, "GET", "/orders/mine", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(mine["orders"][0]["order_id"], order_id);
}

#[tokio::test]
async fn test_empty_cart_checkout_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app, "user@demo", "user123").await;

    let (status, body) = send(&app, "POST", "/orders", Some(&token), Some(delivery_body())).await;

    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["rule"], "empty_cart");
}

#[tokio::test]
async fn test_sold_out_at_checkout_is_conflict() {
    let app_state: AppState = create_test_app_state();
    let mut events = app_state.live_events.subscribe();
    let app: Router = build_router(app_state);
    let admin: String = login_token(&app, "admin@canteen", "admin123").await;
    let customer: String = login_token(&app, "user@demo", "user123").await;
    add_item(&app, &customer, "f1", 1).await;

    let (status, toggled) = send(
        &app,
        "POST",
        "/admin/menu/f1/toggle",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(toggled["sold_out"], true);
    assert_eq!(
        events.try_recv().unwrap(),
        LiveEvent::AvailabilityChanged {
            item_id: String::from("f1"),
            sold_out: true,
        }
    );

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(&customer),
        Some(delivery_body()),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["rule"], "sold_out_at_checkout");
}

#[tokio::test]
async fn test_admin_routes_are_forbidden_to_customers() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app, "user@demo", "user123").await;

    for (method, uri) in [
        ("GET", "/admin/orders"),
        ("GET", "/admin/menu"),
        ("POST", "/admin/menu/f1/toggle"),
        ("DELETE", "/admin/orders/1"),
    ] {
        let (status, _) = send(&app, method, uri, Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_order_lifecycle_through_admin_routes() {
    let app_state: AppState = create_test_app_state();
    let mut events = app_state.live_events.subscribe();
    let app: Router = build_router(app_state);
    let admin: String = login_token(&app, "admin@canteen", "admin123").await;
    let customer: String = login_token(&app, "user@demo", "user123").await;
    add_item(&app, &customer, "s2", 1).await;
    let (_, placed) = send(
        &app,
        "POST",
        "/orders",
        Some(&customer),
        Some(delivery_body()),
    )
    .await;
    let order_id: i64 = placed["order"]["order_id"].as_i64().unwrap();
    events.try_recv().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/admin/orders/{order_id}/status"),
        Some(&admin),
        Some(json!({ "status": "Preparing" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(updated["previous_status"], "Pending");
    assert_eq!(
        events.try_recv().unwrap(),
        LiveEvent::OrderStatusChanged {
            order_id,
            status: String::from("Preparing"),
        }
    );

    let (status, body) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/cancel"),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["rule"], "invalid_cancel_state");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/orders/{order_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(
        events.try_recv().unwrap(),
        LiveEvent::OrderRemoved {
            order_id,
            reason: String::from("deleted"),
        }
    );

    let (status, _) = send(
        &app,
        "GET",
        &format!("/orders/{order_id}"),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);

    let (status, history) = send(
        &app,
        "GET",
        &format!("/admin/orders/{order_id}/history"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(history["events"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_owner_cancel_pending_order() {
    let app: Router = build_router(create_test_app_state());
    let customer: String = login_token(&app, "user@demo", "user123").await;
    add_item(&app, &customer, "s1", 1).await;
    let (_, placed) = send(
        &app,
        "POST",
        "/orders",
        Some(&customer),
        Some(delivery_body()),
    )
    .await;
    let order_id: i64 = placed["order"]["order_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/cancel"),
        Some(&customer),
        None,
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["order_id"], order_id);
    let (_, mine) = send(&app, "GET", "/orders/mine", Some(&customer), None).await;
    assert!(mine["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_status_label_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let admin: String = login_token(&app, "admin@canteen", "admin123").await;
    let customer: String = login_token(&app, "user@demo", "user123").await;
    add_item(&app, &customer, "s1", 1).await;
    let (_, placed) = send(
        &app,
        "POST",
        "/orders",
        Some(&customer),
        Some(delivery_body()),
    )
    .await;
    let order_id: i64 = placed["order"]["order_id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/admin/orders/{order_id}/status"),
        Some(&admin),
        Some(json!({ "status": "Shipped" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}
