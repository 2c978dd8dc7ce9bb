// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! Customer and admin credentials share one policy: a minimum length
//! counted in characters after trimming surrounding whitespace.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 4 }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate, already trimmed
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet policy requirements.
    pub fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_length_accepted() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert!(policy.validate("abcd").is_ok());
        assert!(policy.validate("user123").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> = policy.validate("abc");
        assert_eq!(
            result,
            Err(PasswordPolicyError::TooShort { min_length: 4 })
        );
        assert!(policy.validate("").is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        // Three characters, six bytes
        assert!(policy.validate("ñéü").is_err());
        assert!(policy.validate("ñéüa").is_ok());
    }

    #[test]
    fn test_error_message() {
        let err: PasswordPolicyError = PasswordPolicyError::TooShort { min_length: 4 };
        assert_eq!(
            err.to_string(),
            "Password must be at least 4 characters long"
        );
    }
}
