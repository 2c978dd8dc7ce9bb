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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use canteen_api::{
    AddToCartRequest, AdminMenuResponse, ApiError, BootstrapAccountsRequest,
    BootstrapAccountsResponse, CancelOrderResponse, CartResponse, DeleteOrderResponse,
    GetMenuResponse, ListOrdersResponse, LoginRequest, LoginResponse, OrderHistoryResponse,
    OrderInfo, PlaceOrderRequest, PlaceOrderResponse, RegisterRequest, RegisterResponse,
    SetCartQuantityRequest, SetOrderStatusRequest, SetOrderStatusResponse, ToggleSoldOutResponse,
    UpdateProfileRequest, WhoAmIResponse, add_to_cart, admin_menu, bootstrap_accounts,
    cancel_order, clear_cart, delete_order, get_cart, get_menu, get_order, list_all_orders,
    list_my_orders, login, logout, order_history, place_order, register, remove_cart_item,
    set_cart_quantity, set_order_status, toggle_sold_out, update_profile, whoami,
};
use canteen_audit::Cause;
use canteen_domain::Catalog;
use canteen_persistence::{AccountData, Persistence, PersistenceError};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::SessionAccount;

/// Domain rules that describe a clash with current state rather than a
/// malformed request.
const CONFLICT_RULES: &[&str] = &[
    "duplicate_email",
    "sold_out",
    "sold_out_at_checkout",
    "invalid_cancel_state",
];

/// Canteen Server - HTTP server for the canteen ordering system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// MySQL/MariaDB connection URL. Takes precedence over `--database`.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: std::net::IpAddr,

    /// Path to a JSON menu. If not provided, uses the built-in menu.
    #[arg(long)]
    catalog: Option<String>,

    /// Email of the administrator created when no accounts exist
    #[arg(long, default_value = "admin@canteen")]
    admin_email: String,

    /// Password of the administrator created when no accounts exist
    #[arg(long, default_value = "admin123")]
    admin_password: String,

    /// Also create the demo customer account
    #[arg(long)]
    seed_demo_user: bool,
}

/// Application state shared across handlers.
///
/// Every request locks the persistence layer for the duration of its
/// read-modify-write, which serializes checkouts against availability
/// toggles.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// The fixed menu.
    catalog: Arc<Catalog>,
    /// Live event fan-out.
    live_events: Arc<LiveEventBroadcaster>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Overall status.
    status: String,
    /// Number of items on the menu.
    menu_items: usize,
}

/// Acknowledgement for operations without a richer result.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AckResponse {
    /// Always true on success.
    success: bool,
    /// What happened.
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// The violated domain rule, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The violated domain rule, if any.
    rule: Option<String>,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            rule: self.rule,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::NotAuthenticated | ApiError::AuthenticationFailed { .. } => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { rule, .. } => {
                if CONFLICT_RULES.contains(&rule.as_str()) {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            }
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            rule: err.rule().map(String::from),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            rule: None,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Builds the audit cause for a request made by `account`.
fn request_cause(action: &str, account: &AccountData) -> Cause {
    let stamp: i128 = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    Cause::new(
        format!("http-{action}-{stamp}"),
        format!("HTTP {action} request by {}", account.email),
    )
}

async fn handle_health(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HealthResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let accounts: i64 = persistence.count_accounts()?;
    drop(persistence);

    debug!(accounts, "Database probe succeeded");

    Ok(Json(HealthResponse {
        status: String::from("ok"),
        menu_items: app_state.catalog.len(),
    }))
}

async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    info!(email = %req.email, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = register(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
) -> Result<Json<AckResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &session.token)?;
    drop(persistence);

    info!(account_id = session.account.account_id, "Logged out");

    Ok(Json(AckResponse {
        success: true,
        message: String::from("Logged out"),
    }))
}

async fn handle_whoami(session: SessionAccount) -> Json<WhoAmIResponse> {
    Json(whoami(&session.actor, &session.account))
}

async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: WhoAmIResponse = update_profile(&mut persistence, &req, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_get_menu(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<GetMenuResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetMenuResponse = get_menu(&mut persistence, &app_state.catalog)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_get_cart(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
) -> Result<Json<CartResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CartResponse = get_cart(&mut persistence, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_add_to_cart(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CartResponse =
        add_to_cart(&mut persistence, &app_state.catalog, &req, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_set_cart_quantity(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(item_id): Path<String>,
    Json(req): Json<SetCartQuantityRequest>,
) -> Result<Json<CartResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CartResponse = set_cart_quantity(
        &mut persistence,
        &app_state.catalog,
        &item_id,
        &req,
        &session.actor,
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_remove_cart_item(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(item_id): Path<String>,
) -> Result<Json<CartResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CartResponse = remove_cart_item(
        &mut persistence,
        &app_state.catalog,
        &item_id,
        &session.actor,
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_clear_cart(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
) -> Result<Json<CartResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CartResponse =
        clear_cart(&mut persistence, &app_state.catalog, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_place_order(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<PlaceOrderResponse>, HttpError> {
    info!(
        account_id = session.account.account_id,
        "Handling place_order request"
    );

    let cause: Cause = request_cause("place_order", &session.account);

    let mut persistence = app_state.persistence.lock().await;
    let response: PlaceOrderResponse = place_order(
        &mut persistence,
        &req,
        &session.actor,
        &session.account,
        cause,
    )?;
    drop(persistence);

    app_state.live_events.broadcast(&LiveEvent::OrderPlaced {
        order_id: response.order.order_id,
    });

    Ok(Json(response))
}

async fn handle_list_my_orders(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
) -> Result<Json<ListOrdersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListOrdersResponse = list_my_orders(&mut persistence, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_get_order(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderInfo = get_order(&mut persistence, order_id, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_cancel_order(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(order_id): Path<i64>,
) -> Result<Json<CancelOrderResponse>, HttpError> {
    info!(
        account_id = session.account.account_id,
        order_id, "Handling cancel_order request"
    );

    let cause: Cause = request_cause("cancel_order", &session.account);

    let mut persistence = app_state.persistence.lock().await;
    let response: CancelOrderResponse = cancel_order(
        &mut persistence,
        order_id,
        &session.actor,
        &session.account,
        cause,
    )?;
    drop(persistence);

    app_state.live_events.broadcast(&LiveEvent::OrderRemoved {
        order_id,
        reason: String::from("cancelled"),
    });

    Ok(Json(response))
}

async fn handle_list_all_orders(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
) -> Result<Json<ListOrdersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListOrdersResponse = list_all_orders(&mut persistence, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_set_order_status(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(order_id): Path<i64>,
    Json(req): Json<SetOrderStatusRequest>,
) -> Result<Json<SetOrderStatusResponse>, HttpError> {
    info!(
        account_id = session.account.account_id,
        order_id,
        status = %req.status,
        "Handling set_order_status request"
    );

    let cause: Cause = request_cause("set_order_status", &session.account);

    let mut persistence = app_state.persistence.lock().await;
    let response: SetOrderStatusResponse = set_order_status(
        &mut persistence,
        order_id,
        &req,
        &session.actor,
        &session.account,
        cause,
    )?;
    drop(persistence);

    app_state.live_events.broadcast(&LiveEvent::OrderStatusChanged {
        order_id,
        status: response.order.status.clone(),
    });

    Ok(Json(response))
}

async fn handle_delete_order(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(order_id): Path<i64>,
) -> Result<Json<DeleteOrderResponse>, HttpError> {
    info!(
        account_id = session.account.account_id,
        order_id, "Handling delete_order request"
    );

    let cause: Cause = request_cause("delete_order", &session.account);

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteOrderResponse = delete_order(
        &mut persistence,
        order_id,
        &session.actor,
        &session.account,
        cause,
    )?;
    drop(persistence);

    app_state.live_events.broadcast(&LiveEvent::OrderRemoved {
        order_id,
        reason: String::from("deleted"),
    });

    Ok(Json(response))
}

async fn handle_order_history(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderHistoryResponse =
        order_history(&mut persistence, order_id, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_admin_menu(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
) -> Result<Json<AdminMenuResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AdminMenuResponse =
        admin_menu(&mut persistence, &app_state.catalog, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_toggle_sold_out(
    AxumState(app_state): AxumState<AppState>,
    session: SessionAccount,
    Path(item_id): Path<String>,
) -> Result<Json<ToggleSoldOutResponse>, HttpError> {
    info!(
        account_id = session.account.account_id,
        item_id = %item_id,
        "Handling toggle_sold_out request"
    );

    let cause: Cause = request_cause("toggle_sold_out", &session.account);

    let mut persistence = app_state.persistence.lock().await;
    let response: ToggleSoldOutResponse = toggle_sold_out(
        &mut persistence,
        &app_state.catalog,
        &item_id,
        &session.actor,
        &session.account,
        cause,
    )?;
    drop(persistence);

    app_state.live_events.broadcast(&LiveEvent::AvailabilityChanged {
        item_id: response.item_id.clone(),
        sold_out: response.sold_out,
    });

    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_whoami))
        .route("/auth/profile", put(handle_update_profile))
        .route("/menu", get(handle_get_menu))
        .route("/cart", get(handle_get_cart).delete(handle_clear_cart))
        .route("/cart/items", post(handle_add_to_cart))
        .route(
            "/cart/items/{item_id}",
            put(handle_set_cart_quantity).delete(handle_remove_cart_item),
        )
        .route("/orders", post(handle_place_order))
        .route("/orders/mine", get(handle_list_my_orders))
        .route("/orders/{order_id}", get(handle_get_order))
        .route("/orders/{order_id}/cancel", post(handle_cancel_order))
        .route("/admin/orders", get(handle_list_all_orders))
        .route("/admin/orders/{order_id}", delete(handle_delete_order))
        .route(
            "/admin/orders/{order_id}/status",
            put(handle_set_order_status),
        )
        .route(
            "/admin/orders/{order_id}/history",
            get(handle_order_history),
        )
        .route("/admin/menu", get(handle_admin_menu))
        .route(
            "/admin/menu/{item_id}/toggle",
            post(handle_toggle_sold_out),
        )
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Canteen Server");

    let mut persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let catalog: Catalog = if let Some(path) = &args.catalog {
        info!("Loading menu from: {}", path);
        let json: String = std::fs::read_to_string(path)?;
        Catalog::from_json(&json)?
    } else {
        Catalog::default_menu()
    };
    info!(items = catalog.len(), "Menu loaded");

    let bootstrap: BootstrapAccountsResponse = bootstrap_accounts(
        &mut persistence,
        &BootstrapAccountsRequest {
            admin_email: args.admin_email.clone(),
            admin_password: args.admin_password.clone(),
            seed_demo_user: args.seed_demo_user,
        },
    )?;
    if let Some(admin_id) = bootstrap.admin_account_id {
        info!(
            account_id = admin_id,
            email = %args.admin_email,
            "Created bootstrap administrator"
        );
    }
    if let Some(demo_id) = bootstrap.demo_account_id {
        info!(account_id = demo_id, "Created demo customer account");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        catalog: Arc::new(catalog),
        live_events: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = std::net::SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
