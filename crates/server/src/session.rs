// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer token extraction for authenticated routes.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use canteen_api::{AuthenticatedActor, AuthenticationService};
use canteen_persistence::AccountData;
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Extractor for a logged in account.
///
/// Reads `Authorization: Bearer <token>`, validates the session and yields
/// the actor together with the stored account and the raw token (needed by
/// logout).
///
/// # Errors
///
/// Rejects with HTTP 401 when the header is missing or malformed, or when
/// the session is unknown or expired.
pub struct SessionAccount {
    /// The raw session token.
    pub token: String,
    /// The authenticated actor.
    pub actor: AuthenticatedActor,
    /// The account behind the session.
    pub account: AccountData,
}

impl FromRequestParts<AppState> for SessionAccount {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let (actor, account) = AuthenticationService::validate_session(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;
        drop(persistence);

        debug!(
            account_id = account.account_id,
            role = ?actor.role,
            "Session validated"
        );

        Ok(Self {
            token: token.to_string(),
            actor,
            account,
        })
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// No `Authorization` header.
    MissingAuthorizationHeader,
    /// The header is not `Bearer <token>`.
    InvalidAuthorizationHeader,
    /// The token does not name a live session.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("You must be logged in"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => reason,
        };

        HttpError {
            status: StatusCode::UNAUTHORIZED,
            rule: None,
            message,
        }
        .into_response()
    }
}
