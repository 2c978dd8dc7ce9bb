// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A customer.
    User,
    /// Canteen staff with access to order and menu administration.
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized email address.
///
/// Emails are trimmed and lowercased so that uniqueness and login are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email {
    value: String,
}

impl Email {
    /// Normalizes and validates an email.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the email is blank, contains
    /// whitespace, or has no `@` separating a local part and a host.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: String = raw.trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "Email cannot be empty",
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEmail(String::from(
                "Email cannot contain spaces",
            )));
        }
        match value.split_once('@') {
            Some((local, host)) if !local.is_empty() && !host.is_empty() => {}
            _ => {
                return Err(DomainError::InvalidEmail(format!(
                    "'{value}' is not an email address"
                )));
            }
        }

        Ok(Self { value })
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A registered identity.
///
/// The credential is held only by the persistence layer, as a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    account_id: Option<i64>,
    name: String,
    email: Email,
    role: Role,
}

impl Account {
    /// Creates an account that has not been persisted yet.
    #[must_use]
    pub const fn new(name: String, email: Email, role: Role) -> Self {
        Self {
            account_id: None,
            name,
            email,
            role,
        }
    }

    /// Creates an account with its persisted id.
    #[must_use]
    pub const fn with_id(account_id: i64, name: String, email: Email, role: Role) -> Self {
        Self {
            account_id: Some(account_id),
            name,
            email,
            role,
        }
    }

    #[must_use]
    pub const fn account_id(&self) -> Option<i64> {
        self.account_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// The identity bound to an active session.
///
/// This is a projection taken at login and refreshed explicitly after a
/// profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
