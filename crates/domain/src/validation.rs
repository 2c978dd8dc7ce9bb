// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cart::MAX_QUANTITY;
use crate::error::DomainError;

/// Longest accepted display name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validates and trims an account display name.
///
/// # Arguments
///
/// * `name` - The raw name from user input
///
/// # Returns
///
/// * `Ok(String)` with the trimmed name
/// * `Err(DomainError::InvalidName)` if the name is invalid
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or longer than
/// `MAX_NAME_LENGTH` characters.
pub fn validate_account_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let length: usize = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters, got {length}"
        )));
    }

    Ok(trimmed.to_string())
}

/// Validates a quantity for adding to the cart.
///
/// # Arguments
///
/// * `quantity` - The requested quantity
///
/// # Errors
///
/// Returns `DomainError::InvalidQuantity` if the quantity is not a
/// positive integer no larger than `MAX_QUANTITY`.
pub fn validate_add_quantity(quantity: i64) -> Result<u32, DomainError> {
    if quantity < 1 {
        return Err(DomainError::InvalidQuantity(format!(
            "Quantity must be at least 1, got {quantity}"
        )));
    }

    u32::try_from(quantity)
        .ok()
        .filter(|q| *q <= MAX_QUANTITY)
        .ok_or_else(|| {
            DomainError::InvalidQuantity(format!(
                "Quantity cannot exceed {MAX_QUANTITY}, got {quantity}"
            ))
        })
}
