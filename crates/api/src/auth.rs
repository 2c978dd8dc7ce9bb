// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use canteen_audit::Actor;
use canteen_domain::{Email, Order, Role};
use canteen_persistence::{AccountData, Persistence, PersistenceError, SessionData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// An authenticated account bound to a live session.
///
/// Carries only what authorization decisions need. Handlers that also
/// need the account's name or email receive the matching `AccountData`
/// alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The account behind the session.
    pub account_id: i64,
    /// The session the request arrived on. Carts are keyed by it.
    pub session_id: i64,
    /// The role of the account.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account behind the session
    /// * `session_id` - The session id
    /// * `role` - The role of the account
    #[must_use]
    pub const fn new(account_id: i64, session_id: i64, role: Role) -> Self {
        Self {
            account_id,
            session_id,
            role,
        }
    }

    /// Returns true if this actor holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Converts this actor into an audit `Actor`.
    ///
    /// # Arguments
    ///
    /// * `account` - The account data supplying the email snapshot
    #[must_use]
    pub fn to_audit_actor(&self, account: &AccountData) -> Actor {
        Actor::new(
            Some(self.account_id),
            account.email.clone(),
            self.role.as_str().to_string(),
        )
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Customers act on their own cart and orders. Everything touching other
/// customers' orders or the menu requires the admin role.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may list every order in the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_list_all_orders(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "list_all_orders")
    }

    /// Checks if an actor may change order status.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_set_order_status(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "set_order_status")
    }

    /// Checks if an actor may delete orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_delete_order(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "delete_order")
    }

    /// Checks if an actor may read the audit trail of an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_view_order_history(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "view_order_history")
    }

    /// Checks if an actor may view and toggle menu availability.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_menu(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_menu")
    }

    /// Checks if an actor may cancel an order.
    ///
    /// Only the owner may cancel. Admins remove orders through
    /// deletion instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not own the order.
    pub fn authorize_cancel_order(
        actor: &AuthenticatedActor,
        order: &Order,
    ) -> Result<(), AuthError> {
        if order.is_owned_by(actor.account_id) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("cancel_order"),
                required_role: String::from("Owner"),
            })
        }
    }

    /// Returns true if an actor may see an order.
    #[must_use]
    pub const fn can_view_order(actor: &AuthenticatedActor, order: &Order) -> bool {
        actor.is_admin() || order.is_owned_by(actor.account_id)
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Session lifetime from login.
    pub const SESSION_DURATION: Duration = Duration::hours(8);

    /// Authenticates an account by email and password and opens a session.
    ///
    /// Expired sessions are purged first. Unknown email and wrong
    /// password produce the same error.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The email as typed (normalised here)
    /// * `password` - The password as typed (trimmed here)
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `account`, `session`)
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, AccountData, SessionData), AuthError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        let purged: usize = persistence
            .delete_expired_sessions(now)
            .map_err(Self::map_persistence_error)?;
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }

        let email: Email = Email::parse(email).map_err(|_| Self::invalid_credentials())?;

        let account: AccountData = persistence
            .get_account_by_email(&email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!(email = %email, "Login attempt for unknown email");
                Self::invalid_credentials()
            })?;

        let password_valid: bool =
            Persistence::verify_password(password.trim(), &account.password_hash)
                .map_err(Self::map_persistence_error)?;
        if !password_valid {
            warn!(account_id = account.account_id, "Login attempt with wrong password");
            return Err(Self::invalid_credentials());
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime = now + Self::SESSION_DURATION;

        let session_id: i64 = persistence
            .create_session(&session_token, account.account_id, now, expires_at)
            .map_err(Self::map_persistence_error)?;

        persistence
            .update_last_login(account.account_id, now)
            .map_err(Self::map_persistence_error)?;

        let session: SessionData = persistence
            .get_session_by_token(&session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Session not found after creation"),
            })?;

        info!(
            account_id = account.account_id,
            session_id, "Account logged in"
        );

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(account.account_id, session_id, account.role);

        Ok((session_token, authenticated_actor, account, session))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// An expired session is deleted on sight. A valid one has its
    /// activity timestamp refreshed.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `account`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, AccountData), AuthError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!("Rejected unknown session token");
                AuthError::AuthenticationFailed {
                    reason: String::from("Invalid session token"),
                }
            })?;

        if session.is_expired(now) {
            warn!(session_id = session.session_id, "Rejected expired session");
            persistence
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let account: AccountData = persistence
            .get_account_by_id(session.account_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account not found"),
            })?;

        persistence
            .update_session_activity(session.session_id, now)
            .map_err(Self::map_persistence_error)?;

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(account.account_id, session.session_id, account.role);

        Ok((authenticated_actor, account))
    }

    /// Logs out by deleting the session. The session's cart goes with it.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        let deleted: bool = persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        if deleted {
            info!("Session logged out");
        } else {
            debug!("Logout for a session that no longer exists");
        }

        Ok(())
    }

    /// Generates an opaque session token.
    fn generate_session_token() -> String {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        }
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
