// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an account is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use canteen_domain::{Order, Role};

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, GlobalCapabilities, OrderCapabilities};

/// Computes global capabilities for an authenticated account.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
///
/// # Returns
///
/// A `GlobalCapabilities` struct with all capability flags set.
#[must_use]
pub const fn compute_global_capabilities(actor: &AuthenticatedActor) -> GlobalCapabilities {
    match actor.role {
        Role::Admin => GlobalCapabilities {
            can_place_orders: Capability::Allowed,
            can_view_all_orders: Capability::Allowed,
            can_manage_orders: Capability::Allowed,
            can_manage_menu: Capability::Allowed,
        },
        Role::User => GlobalCapabilities {
            can_place_orders: Capability::Allowed,
            can_view_all_orders: Capability::Denied,
            can_manage_orders: Capability::Denied,
            can_manage_menu: Capability::Denied,
        },
    }
}

/// Computes what an actor may do with a specific order.
///
/// Cancellation is reserved for the owner while the order is pending.
/// Status changes are admin only and unavailable once delivered.
/// Deletion is admin only in any status.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
/// * `order` - The order
#[must_use]
pub const fn compute_order_capabilities(
    actor: &AuthenticatedActor,
    order: &Order,
) -> OrderCapabilities {
    let is_owner: bool = order.is_owned_by(actor.account_id);
    let is_admin: bool = actor.is_admin();

    OrderCapabilities {
        can_cancel: Capability::from_bool(is_owner && order.status().can_owner_cancel()),
        can_set_status: Capability::from_bool(is_admin && !order.status().is_terminal()),
        can_delete: Capability::from_bool(is_admin),
    }
}
