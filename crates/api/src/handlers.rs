// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler is one synchronous read-modify-write unit against the
//! persistence adapter. Callers that share an adapter across threads must
//! serialise calls.

use canteen::{
    AvailabilityTransition, CartTransition, CheckoutResult, Command, OrderOutcome,
    OrderTransition, apply_availability, apply_cart, apply_checkout, apply_order_transition,
};
use canteen_audit::{AuditEvent, Cause};
use canteen_domain::{
    AvailabilitySet, Cart, CartLine, Catalog, CatalogItem, Category, DELIVERY_FEE, DomainError,
    Email, Order, OrderLine, OrderStatus, Role, validate_account_name, validate_add_quantity,
};
use canteen_persistence::{
    AccountData, PersistCheckoutResult, Persistence, PersistenceError, SessionData,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::capabilities::{compute_global_capabilities, compute_order_capabilities};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AddToCartRequest, AdminMenuResponse, AuditEventInfo, BootstrapAccountsRequest,
    BootstrapAccountsResponse, CancelOrderResponse, CartLineInfo, CartResponse,
    DeleteOrderResponse, GetMenuResponse, ListOrdersResponse, LoginRequest, LoginResponse,
    MenuCategoryInfo, MenuItemInfo, OrderHistoryResponse, OrderInfo, OrderLineInfo,
    PlaceOrderRequest, PlaceOrderResponse, RegisterRequest, RegisterResponse,
    SetCartQuantityRequest, SetOrderStatusRequest, SetOrderStatusResponse, ToggleSoldOutResponse,
    UpdateProfileRequest, WhoAmIResponse,
};

/// Email of the optional demo customer.
const DEMO_USER_EMAIL: &str = "user@demo";
/// Password of the optional demo customer.
const DEMO_USER_PASSWORD: &str = "user123";

// ============================================================================
// Conversions
// ============================================================================

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn menu_item_info(item: &CatalogItem, availability: &AvailabilitySet) -> MenuItemInfo {
    MenuItemInfo {
        id: item.id().to_string(),
        name: item.name().to_string(),
        price: item.price(),
        category: item.category().as_str().to_string(),
        sold_out: availability.is_sold_out(item.id()),
    }
}

fn cart_response(cart: &Cart) -> CartResponse {
    CartResponse {
        lines: cart
            .lines()
            .iter()
            .map(|line: &CartLine| CartLineInfo {
                item_id: line.item_id().to_string(),
                name: line.name().to_string(),
                price: line.price(),
                quantity: line.quantity(),
                line_total: line.line_total(),
            })
            .collect(),
        item_count: cart.item_count(),
        subtotal: cart.subtotal(),
        delivery_fee: DELIVERY_FEE,
        grand_total: cart.grand_total(),
    }
}

fn order_info(order: &Order, actor: &AuthenticatedActor) -> Result<OrderInfo, ApiError> {
    let order_id: i64 = order.order_id().ok_or_else(|| ApiError::Internal {
        message: String::from("Order has not been saved"),
    })?;

    Ok(OrderInfo {
        order_id,
        owner_id: order.owner_id(),
        owner_email: order.owner_email().to_string(),
        recipient_name: order.delivery().recipient_name().to_string(),
        contact: order.delivery().contact().to_string(),
        address: order.delivery().address().to_string(),
        lines: order
            .lines()
            .iter()
            .map(|line: &OrderLine| OrderLineInfo {
                item_id: line.item_id().to_string(),
                name: line.name().to_string(),
                unit_price: line.unit_price(),
                quantity: line.quantity(),
                line_total: line.line_total(),
            })
            .collect(),
        items_total: order.items_total(),
        delivery_fee: order.delivery_fee(),
        total: order.total(),
        payment_method: order.payment_method().to_string(),
        status: order.status().as_str().to_string(),
        created_at: format_timestamp(order.created_at())?,
        updated_at: format_timestamp(order.updated_at())?,
        capabilities: compute_order_capabilities(actor, order),
    })
}

fn audit_event_info(event: AuditEvent) -> Result<AuditEventInfo, ApiError> {
    let event_id: i64 = event.event_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Audit event has not been saved"),
    })?;

    Ok(AuditEventInfo {
        event_id,
        order_id: event.order_id,
        actor_account_id: event.actor.account_id,
        actor_email: event.actor.email,
        actor_role: event.actor.role,
        cause_id: event.cause.id,
        cause_description: event.cause.description,
        action: event.action.name,
        details: event.action.details,
        before: event.before.data,
        after: event.after.data,
    })
}

/// Loads an order the actor is allowed to see.
///
/// Orders owned by someone else are reported as missing to non-admins.
fn load_visible_order(
    persistence: &mut Persistence,
    order_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Order, ApiError> {
    let order: Option<Order> = persistence
        .get_order(order_id)
        .map_err(|e| translate_persistence_error(e, "load order"))?;

    match order {
        Some(order) if AuthorizationService::can_view_order(actor, &order) => Ok(order),
        _ => Err(ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("Order {order_id} does not exist"),
        }),
    }
}

fn load_order(persistence: &mut Persistence, order_id: i64) -> Result<Order, ApiError> {
    persistence
        .get_order(order_id)
        .map_err(|e| translate_persistence_error(e, "load order"))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("Order {order_id} does not exist"),
        })
}

fn load_availability(persistence: &mut Persistence) -> Result<AvailabilitySet, ApiError> {
    persistence
        .load_availability()
        .map_err(|e| translate_persistence_error(e, "load availability"))
}

// ============================================================================
// Accounts
// ============================================================================

/// Seeds the account directory at startup.
///
/// An admin account is created only when the directory is empty. The demo
/// customer is created when requested and not already present.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The seeding configuration
///
/// # Errors
///
/// Returns an error if the configured credentials are invalid or
/// database operations fail.
pub fn bootstrap_accounts(
    persistence: &mut Persistence,
    request: &BootstrapAccountsRequest,
) -> Result<BootstrapAccountsResponse, ApiError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let policy: PasswordPolicy = PasswordPolicy::default();

    let account_count: i64 = persistence
        .count_accounts()
        .map_err(|e| translate_persistence_error(e, "count accounts"))?;

    let admin_account_id: Option<i64> = if account_count == 0 {
        let email: Email = Email::parse(&request.admin_email).map_err(translate_domain_error)?;
        let password: &str = request.admin_password.trim();
        policy.validate(password)?;

        let account_id: i64 = persistence
            .create_account("Administrator", &email, password, Role::Admin, now)
            .map_err(|e| translate_persistence_error(e, "create admin account"))?;
        info!(account_id, email = %email, "Seeded admin account");
        Some(account_id)
    } else {
        debug!(account_count, "Account directory already populated");
        None
    };

    let demo_account_id: Option<i64> = if request.seed_demo_user {
        let email: Email = Email::parse(DEMO_USER_EMAIL).map_err(translate_domain_error)?;
        let existing: Option<AccountData> = persistence
            .get_account_by_email(&email)
            .map_err(|e| translate_persistence_error(e, "look up demo account"))?;

        if existing.is_some() {
            None
        } else {
            let account_id: i64 = persistence
                .create_account("Demo User", &email, DEMO_USER_PASSWORD, Role::User, now)
                .map_err(|e| translate_persistence_error(e, "create demo account"))?;
            info!(account_id, "Seeded demo customer account");
            Some(account_id)
        }
    } else {
        None
    };

    Ok(BootstrapAccountsResponse {
        admin_account_id,
        demo_account_id,
    })
}

/// Registers a customer account.
///
/// Name, email and password are trimmed. The email is lowercased. The
/// new account always has the `user` role.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The registration request
///
/// # Errors
///
/// Returns an error if:
/// - The name or email is blank or malformed
/// - The password is shorter than the policy allows
/// - The email is already registered
/// - Database operations fail
pub fn register(
    persistence: &mut Persistence,
    request: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    let name: String = validate_account_name(&request.name).map_err(translate_domain_error)?;
    let email: Email = Email::parse(&request.email).map_err(translate_domain_error)?;
    let password: &str = request.password.trim();

    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(password)?;

    let account_id: i64 = persistence
        .create_account(&name, &email, password, Role::User, OffsetDateTime::now_utc())
        .map_err(|e| translate_persistence_error(e, "create account"))?;

    info!(account_id, email = %email, "Registered account");

    Ok(RegisterResponse {
        account_id,
        name,
        email: email.value().to_string(),
        role: Role::User.as_str().to_string(),
        message: String::from("Account created. You can now log in."),
    })
}

/// Authenticates an account and creates a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
///
/// # Errors
///
/// Returns an error if the email is unknown, the password does not match,
/// or database operations fail.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _authenticated_actor, account, session): (
        String,
        AuthenticatedActor,
        AccountData,
        SessionData,
    ) = AuthenticationService::login(persistence, &request.email, &request.password)?;

    Ok(LoginResponse {
        session_token,
        account_id: account.account_id,
        name: account.name,
        email: account.email,
        role: account.role.as_str().to_string(),
        expires_at: format_timestamp(session.expires_at)?,
    })
}

/// Logs out by deleting the session and its cart.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the current account's information with global capabilities.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
/// * `account` - The account data from the validated session
#[must_use]
pub fn whoami(actor: &AuthenticatedActor, account: &AccountData) -> WhoAmIResponse {
    WhoAmIResponse {
        account_id: account.account_id,
        name: account.name.clone(),
        email: account.email.clone(),
        role: account.role.as_str().to_string(),
        capabilities: compute_global_capabilities(actor),
    }
}

/// Updates the caller's own name and/or password.
///
/// Missing or blank fields are left unchanged. Returns the refreshed
/// profile.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The profile update
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if:
/// - The new name is too long
/// - The new password is shorter than the policy allows
/// - Database operations fail
pub fn update_profile(
    persistence: &mut Persistence,
    request: &UpdateProfileRequest,
    actor: &AuthenticatedActor,
) -> Result<WhoAmIResponse, ApiError> {
    if let Some(name) = request.name.as_deref().filter(|n| !n.trim().is_empty()) {
        let name: String = validate_account_name(name).map_err(translate_domain_error)?;
        persistence
            .update_account_name(actor.account_id, &name)
            .map_err(|e| translate_persistence_error(e, "update name"))?;
        info!(account_id = actor.account_id, "Updated account name");
    }

    if let Some(password) = request
        .password
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        let policy: PasswordPolicy = PasswordPolicy::default();
        policy.validate(password)?;
        persistence
            .update_password(actor.account_id, password)
            .map_err(|e| translate_persistence_error(e, "update password"))?;
        info!(account_id = actor.account_id, "Updated account password");
    }

    let account: AccountData = persistence
        .get_account_by_id(actor.account_id)
        .map_err(|e| translate_persistence_error(e, "reload account"))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message: format!("Account {} does not exist", actor.account_id),
        })?;

    Ok(whoami(actor, &account))
}

// ============================================================================
// Menu
// ============================================================================

/// Returns the catalog grouped by category with sold out flags.
///
/// # Errors
///
/// Returns an error if availability cannot be loaded.
pub fn get_menu(
    persistence: &mut Persistence,
    catalog: &Catalog,
) -> Result<GetMenuResponse, ApiError> {
    let availability: AvailabilitySet = load_availability(persistence)?;

    let categories: Vec<MenuCategoryInfo> = Category::ALL
        .iter()
        .map(|category: &Category| MenuCategoryInfo {
            category: category.as_str().to_string(),
            label: category.label().to_string(),
            items: catalog
                .by_category(*category)
                .map(|item: &CatalogItem| menu_item_info(item, &availability))
                .collect(),
        })
        .filter(|c: &MenuCategoryInfo| !c.items.is_empty())
        .collect();

    Ok(GetMenuResponse {
        categories,
        delivery_fee: DELIVERY_FEE,
    })
}

/// Returns every catalog item with its sold out flag.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or availability cannot
/// be loaded.
pub fn admin_menu(
    persistence: &mut Persistence,
    catalog: &Catalog,
    actor: &AuthenticatedActor,
) -> Result<AdminMenuResponse, ApiError> {
    AuthorizationService::authorize_manage_menu(actor)?;

    let availability: AvailabilitySet = load_availability(persistence)?;
    let items: Vec<MenuItemInfo> = catalog
        .items()
        .iter()
        .map(|item: &CatalogItem| menu_item_info(item, &availability))
        .collect();
    let sold_out_count: usize = items.iter().filter(|i| i.sold_out).count();

    Ok(AdminMenuResponse {
        items,
        sold_out_count,
    })
}

/// Flips the sold out flag of a catalog item.
///
/// Only Admin actors may toggle availability. Emits an audit event on
/// success.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `catalog` - The menu
/// * `item_id` - The item to toggle
/// * `actor` - The authenticated actor performing this action
/// * `account` - The account data for audit attribution
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The item is not in the catalog
/// - Database operations fail
pub fn toggle_sold_out(
    persistence: &mut Persistence,
    catalog: &Catalog,
    item_id: &str,
    actor: &AuthenticatedActor,
    account: &AccountData,
    cause: Cause,
) -> Result<ToggleSoldOutResponse, ApiError> {
    AuthorizationService::authorize_manage_menu(actor)?;

    let availability: AvailabilitySet = load_availability(persistence)?;
    let command: Command = Command::ToggleSoldOut {
        item_id: item_id.to_string(),
    };

    let transition: AvailabilityTransition = apply_availability(
        catalog,
        &availability,
        command,
        actor.to_audit_actor(account),
        cause,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_availability_toggle(&transition, OffsetDateTime::now_utc())
        .map_err(|e| translate_persistence_error(e, "toggle availability"))?;

    let name: String = catalog
        .get(&transition.item_id)
        .map_or_else(String::new, |item: &CatalogItem| item.name().to_string());

    info!(
        item_id = %transition.item_id,
        sold_out = transition.sold_out,
        event_id,
        "Toggled availability"
    );

    let message: String = if transition.sold_out {
        format!("{name} is now sold out")
    } else {
        format!("{name} is available again")
    };

    Ok(ToggleSoldOutResponse {
        item_id: transition.item_id,
        name,
        sold_out: transition.sold_out,
        event_id,
        message,
    })
}

// ============================================================================
// Cart
// ============================================================================

fn update_cart(
    persistence: &mut Persistence,
    catalog: &Catalog,
    actor: &AuthenticatedActor,
    command: Command,
) -> Result<CartResponse, ApiError> {
    let cart: Cart = persistence
        .load_cart(actor.session_id)
        .map_err(|e| translate_persistence_error(e, "load cart"))?;
    let availability: AvailabilitySet = load_availability(persistence)?;

    let transition: CartTransition =
        apply_cart(&cart, catalog, &availability, command).map_err(translate_core_error)?;

    persistence
        .save_cart(actor.session_id, &transition.new_cart)
        .map_err(|e| translate_persistence_error(e, "save cart"))?;

    Ok(cart_response(&transition.new_cart))
}

/// Returns the caller's cart with totals.
///
/// # Errors
///
/// Returns an error if the cart cannot be loaded.
pub fn get_cart(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<CartResponse, ApiError> {
    let cart: Cart = persistence
        .load_cart(actor.session_id)
        .map_err(|e| translate_persistence_error(e, "load cart"))?;
    Ok(cart_response(&cart))
}

/// Adds units of an item to the caller's cart.
///
/// Adding an item already in the cart merges into the existing line.
///
/// # Errors
///
/// Returns an error if:
/// - The quantity is not positive
/// - The item is not in the catalog
/// - The item is sold out
/// - Database operations fail
pub fn add_to_cart(
    persistence: &mut Persistence,
    catalog: &Catalog,
    request: &AddToCartRequest,
    actor: &AuthenticatedActor,
) -> Result<CartResponse, ApiError> {
    let quantity: u32 =
        validate_add_quantity(request.quantity.unwrap_or(1)).map_err(translate_domain_error)?;

    let response: CartResponse = update_cart(
        persistence,
        catalog,
        actor,
        Command::AddToCart {
            item_id: request.item_id.clone(),
            quantity,
        },
    )?;

    debug!(
        session_id = actor.session_id,
        item_id = %request.item_id,
        quantity,
        "Added to cart"
    );
    Ok(response)
}

/// Sets the quantity of a cart line. Zero or less removes it.
///
/// # Errors
///
/// Returns an error if the quantity is too large or database operations
/// fail.
pub fn set_cart_quantity(
    persistence: &mut Persistence,
    catalog: &Catalog,
    item_id: &str,
    request: &SetCartQuantityRequest,
    actor: &AuthenticatedActor,
) -> Result<CartResponse, ApiError> {
    update_cart(
        persistence,
        catalog,
        actor,
        Command::SetCartQuantity {
            item_id: item_id.to_string(),
            quantity: request.quantity,
        },
    )
}

/// Removes a line from the caller's cart.
///
/// # Errors
///
/// Returns an error if database operations fail.
pub fn remove_cart_item(
    persistence: &mut Persistence,
    catalog: &Catalog,
    item_id: &str,
    actor: &AuthenticatedActor,
) -> Result<CartResponse, ApiError> {
    update_cart(
        persistence,
        catalog,
        actor,
        Command::RemoveFromCart {
            item_id: item_id.to_string(),
        },
    )
}

/// Empties the caller's cart.
///
/// # Errors
///
/// Returns an error if database operations fail.
pub fn clear_cart(
    persistence: &mut Persistence,
    catalog: &Catalog,
    actor: &AuthenticatedActor,
) -> Result<CartResponse, ApiError> {
    update_cart(persistence, catalog, actor, Command::ClearCart)
}

// ============================================================================
// Orders
// ============================================================================

/// Places an order from the caller's cart.
///
/// The sold out check is repeated inside the commit transaction, so an
/// item toggled between validation and commit still fails the checkout.
/// On success the cart is empty and the order is `Pending`.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - Delivery details
/// * `actor` - The authenticated actor placing the order
/// * `account` - The account data (owner snapshot)
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The cart is empty
/// - Any cart item is sold out
/// - A delivery field is blank
/// - Database operations fail
pub fn place_order(
    persistence: &mut Persistence,
    request: &PlaceOrderRequest,
    actor: &AuthenticatedActor,
    account: &AccountData,
    cause: Cause,
) -> Result<PlaceOrderResponse, ApiError> {
    let cart: Cart = persistence
        .load_cart(actor.session_id)
        .map_err(|e| translate_persistence_error(e, "load cart"))?;
    let availability: AvailabilitySet = load_availability(persistence)?;

    let command: Command = Command::PlaceOrder {
        recipient_name: request.recipient_name.clone(),
        contact: request.contact.clone(),
        address: request.address.clone(),
    };

    let result: CheckoutResult = apply_checkout(
        Some(&account.to_session()),
        &cart,
        &availability,
        command,
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistCheckoutResult = persistence
        .persist_checkout(actor.session_id, &result)
        .map_err(|e| translate_persistence_error(e, "place order"))?;

    let order: OrderInfo = order_info(&persisted.order, actor)?;
    let message: String = format!(
        "Order #{} placed. Total {} (cash on delivery).",
        order.order_id, order.total
    );

    Ok(PlaceOrderResponse {
        order,
        event_id: persisted.event_id,
        message,
    })
}

/// Lists the caller's own orders, newest first.
///
/// # Errors
///
/// Returns an error if database operations fail.
pub fn list_my_orders(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListOrdersResponse, ApiError> {
    let orders: Vec<Order> = persistence
        .list_orders_for_owner(actor.account_id)
        .map_err(|e| translate_persistence_error(e, "list orders"))?;

    Ok(ListOrdersResponse {
        orders: orders
            .iter()
            .map(|o: &Order| order_info(o, actor))
            .collect::<Result<Vec<OrderInfo>, ApiError>>()?,
    })
}

/// Lists every order in the ledger, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or database operations
/// fail.
pub fn list_all_orders(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListOrdersResponse, ApiError> {
    AuthorizationService::authorize_list_all_orders(actor)?;

    let orders: Vec<Order> = persistence
        .list_all_orders()
        .map_err(|e| translate_persistence_error(e, "list orders"))?;

    Ok(ListOrdersResponse {
        orders: orders
            .iter()
            .map(|o: &Order| order_info(o, actor))
            .collect::<Result<Vec<OrderInfo>, ApiError>>()?,
    })
}

/// Returns a single order visible to the actor.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the order does not exist or belongs to
/// another customer.
pub fn get_order(
    persistence: &mut Persistence,
    order_id: i64,
    actor: &AuthenticatedActor,
) -> Result<OrderInfo, ApiError> {
    let order: Order = load_visible_order(persistence, order_id, actor)?;
    order_info(&order, actor)
}

/// Cancels one of the caller's own orders.
///
/// Only `Pending` orders can be cancelled. A cancelled order is removed
/// from the ledger; its audit trail remains.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `order_id` - The order to cancel
/// * `actor` - The authenticated actor
/// * `account` - The account data for audit attribution
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The order does not exist or is not visible to the actor
/// - The actor does not own the order
/// - The order is no longer `Pending`
/// - Database operations fail
pub fn cancel_order(
    persistence: &mut Persistence,
    order_id: i64,
    actor: &AuthenticatedActor,
    account: &AccountData,
    cause: Cause,
) -> Result<CancelOrderResponse, ApiError> {
    let order: Order = load_visible_order(persistence, order_id, actor)?;
    AuthorizationService::authorize_cancel_order(actor, &order)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let transition: OrderTransition = apply_order_transition(
        &order,
        Command::CancelOrder,
        actor.to_audit_actor(account),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_order_transition(&transition, now)
        .map_err(|e| translate_persistence_error(e, "cancel order"))?;

    Ok(CancelOrderResponse {
        order_id,
        event_id,
        message: format!("Order #{order_id} cancelled"),
    })
}

/// Changes the status of an order.
///
/// Admins may move an order to any status, skipping or going back,
/// except out of `Delivered`. Concurrent changes resolve last writer wins,
/// but a change loaded before the order was delivered is refused.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `order_id` - The order
/// * `request` - The requested status label
/// * `actor` - The authenticated actor
/// * `account` - The account data for audit attribution
/// * `cause` - The cause for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The status label is unknown
/// - The order does not exist
/// - The order is already delivered
/// - Database operations fail
pub fn set_order_status(
    persistence: &mut Persistence,
    order_id: i64,
    request: &SetOrderStatusRequest,
    actor: &AuthenticatedActor,
    account: &AccountData,
    cause: Cause,
) -> Result<SetOrderStatusResponse, ApiError> {
    AuthorizationService::authorize_set_order_status(actor)?;

    let status: OrderStatus = request
        .status
        .parse::<OrderStatus>()
        .map_err(translate_domain_error)?;
    let order: Order = load_order(persistence, order_id)?;
    let previous_status: OrderStatus = order.status();

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let transition: OrderTransition = apply_order_transition(
        &order,
        Command::SetOrderStatus { status },
        actor.to_audit_actor(account),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_order_transition(&transition, now)
        .map_err(|e| match e {
            PersistenceError::StaleOrderState { status: current, .. } => {
                translate_domain_error(DomainError::InvalidStatusTransition {
                    from: current,
                    to: status.as_str().to_string(),
                    reason: String::from("a delivered order cannot be reopened"),
                })
            }
            other => translate_persistence_error(other, "update order status"),
        })?;

    let OrderOutcome::Updated(updated) = &transition.outcome else {
        return Err(ApiError::Internal {
            message: String::from("Status change did not produce an updated order"),
        });
    };

    Ok(SetOrderStatusResponse {
        order: order_info(updated, actor)?,
        previous_status: previous_status.as_str().to_string(),
        event_id,
        message: format!(
            "Order #{order_id} moved from {} to {}",
            previous_status.as_str(),
            status.as_str()
        ),
    })
}

/// Deletes an order regardless of its status.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Admin)
/// - The order does not exist
/// - Database operations fail
pub fn delete_order(
    persistence: &mut Persistence,
    order_id: i64,
    actor: &AuthenticatedActor,
    account: &AccountData,
    cause: Cause,
) -> Result<DeleteOrderResponse, ApiError> {
    AuthorizationService::authorize_delete_order(actor)?;

    let order: Order = load_order(persistence, order_id)?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let transition: OrderTransition = apply_order_transition(
        &order,
        Command::DeleteOrder,
        actor.to_audit_actor(account),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_order_transition(&transition, now)
        .map_err(|e| translate_persistence_error(e, "delete order"))?;

    Ok(DeleteOrderResponse {
        order_id,
        previous_status: order.status().as_str().to_string(),
        event_id,
        message: format!("Order #{order_id} deleted"),
    })
}

/// Returns the audit trail recorded for an order.
///
/// Events of orders that have since been cancelled or deleted are still
/// returned.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or database operations
/// fail.
pub fn order_history(
    persistence: &mut Persistence,
    order_id: i64,
    actor: &AuthenticatedActor,
) -> Result<OrderHistoryResponse, ApiError> {
    AuthorizationService::authorize_view_order_history(actor)?;

    let events: Vec<AuditEvent> = persistence
        .get_audit_events_for_order(order_id)
        .map_err(|e| translate_persistence_error(e, "load order history"))?;

    Ok(OrderHistoryResponse {
        order_id,
        events: events
            .into_iter()
            .map(audit_event_info)
            .collect::<Result<Vec<AuditEventInfo>, ApiError>>()?,
    })
}
