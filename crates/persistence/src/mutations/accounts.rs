// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account and session mutations.
//!
//! Emails arrive already normalized by the caller. Passwords arrive in
//! plain text and are hashed here with bcrypt before they touch the
//! database.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{accounts, sessions};
use crate::error::PersistenceError;

fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}

backend_fn! {
/// Creates a new account.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The display name
/// * `email` - The normalized email
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The role (`user` or `admin`)
/// * `now` - Encoded creation timestamp
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if the email is taken, or
/// an error if the insert fails.
pub fn create_account(
    conn: &mut _,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
    now: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating account for email: {}, role: {}", email, role);

    let password_hash: String = hash_password(password)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let existing: i64 = accounts::table
            .filter(accounts::email.eq(email))
            .count()
            .get_result(conn)?;
        if existing > 0 {
            return Err(PersistenceError::DuplicateEmail(email.to_string()));
        }

        diesel::insert_into(accounts::table)
            .values((
                accounts::name.eq(name),
                accounts::email.eq(email),
                accounts::password_hash.eq(&password_hash),
                accounts::role.eq(role),
                accounts::created_at.eq(now),
            ))
            .execute(conn)?;

        let account_id: i64 = conn.get_last_insert_rowid()?;
        info!(account_id, "Account created");
        Ok(account_id)
    })
}
}

backend_fn! {
/// Changes an account's display name.
///
/// # Errors
///
/// Returns `PersistenceError::AccountNotFound` if no row was updated.
pub fn update_account_name(
    conn: &mut _,
    account_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    debug!("Updating name for account ID: {}", account_id);

    let updated: usize = diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(accounts::name.eq(name))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::AccountNotFound(account_id.to_string()));
    }
    Ok(())
}
}

backend_fn! {
/// Replaces an account's password.
///
/// # Errors
///
/// Returns an error if hashing fails or no row was updated.
pub fn update_password(
    conn: &mut _,
    account_id: i64,
    password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for account ID: {}", account_id);

    let password_hash: String = hash_password(password)?;

    let updated: usize = diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(accounts::password_hash.eq(&password_hash))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::AccountNotFound(account_id.to_string()));
    }
    Ok(())
}
}

backend_fn! {
/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &mut _, account_id: i64, now: &str) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for account ID: {}", account_id);

    diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(accounts::last_login_at.eq(Some(now)))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Creates a login session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The opaque bearer token
/// * `account_id` - The account the session belongs to
/// * `now` - Encoded creation timestamp
/// * `expires_at` - Encoded expiry timestamp
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    account_id: i64,
    now: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!("Creating session for account ID: {}", account_id);

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::account_id.eq(account_id),
            sessions::created_at.eq(now),
            sessions::last_activity_at.eq(now),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;
    Ok(session_id)
}
}

backend_fn! {
/// Touches a session's last activity timestamp.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut _,
    session_id: i64,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(now))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes a session. Its cart lines are removed by cascade.
///
/// Returns `true` if a session was deleted.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<bool, PersistenceError> {
    let deleted: usize =
        diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
            .execute(conn)?;

    debug!(deleted, "Deleted session");
    Ok(deleted > 0)
}
}

backend_fn! {
/// Deletes every session whose expiry is at or before `now`.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
        .execute(conn)?;

    if deleted > 0 {
        info!(deleted, "Purged expired sessions");
    }
    Ok(deleted)
}
}
