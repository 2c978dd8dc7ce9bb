// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account and session queries.

use canteen_domain::Role;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use std::str::FromStr;
use tracing::debug;

use crate::conversions::decode_timestamp;
use crate::data_models::{AccountData, SessionData};
use crate::diesel_schema::{accounts, sessions};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = accounts)]
struct AccountRow {
    account_id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: String,
    last_login_at: Option<String>,
}

impl TryFrom<AccountRow> for AccountData {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: row.account_id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            created_at: decode_timestamp(&row.created_at)?,
            last_login_at: row
                .last_login_at
                .as_deref()
                .map(decode_timestamp)
                .transpose()?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    account_id: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

impl TryFrom<SessionRow> for SessionData {
    type Error = PersistenceError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            session_id: row.session_id,
            session_token: row.session_token,
            account_id: row.account_id,
            created_at: decode_timestamp(&row.created_at)?,
            last_activity_at: decode_timestamp(&row.last_activity_at)?,
            expires_at: decode_timestamp(&row.expires_at)?,
        })
    }
}

backend_fn! {
/// Retrieves an account by normalized email.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no account has this email.
pub fn get_account_by_email(
    conn: &mut _,
    email: &str,
) -> Result<Option<AccountData>, PersistenceError> {
    debug!("Looking up account by email: {}", email);

    let row: Option<AccountRow> = accounts::table
        .filter(accounts::email.eq(email))
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AccountData::try_from).transpose()
}
}

backend_fn! {
/// Retrieves an account by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account does not exist.
pub fn get_account_by_id(
    conn: &mut _,
    account_id: i64,
) -> Result<Option<AccountData>, PersistenceError> {
    let row: Option<AccountRow> = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AccountData::try_from).transpose()
}
}

backend_fn! {
/// Counts all accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_accounts(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(accounts::table.count().get_result(conn)?)
}
}

backend_fn! {
/// Counts accounts holding the admin role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_admin_accounts(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(accounts::table
        .filter(accounts::role.eq(Role::Admin.as_str()))
        .count()
        .get_result(conn)?)
}
}

backend_fn! {
/// Retrieves a session by token.
///
/// Expiry is not checked here.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the token is unknown.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    row.map(SessionData::try_from).transpose()
}
}

/// Checks a plain-text password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
