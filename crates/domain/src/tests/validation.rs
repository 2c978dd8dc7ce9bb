// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, MAX_NAME_LENGTH, MAX_QUANTITY, validate_account_name, validate_add_quantity,
};

#[test]
fn test_validate_account_name_trims() {
    let result: Result<String, DomainError> = validate_account_name("  Test User  ");
    assert_eq!(result, Ok(String::from("Test User")));
}

#[test]
fn test_validate_account_name_rejects_blank() {
    let result: Result<String, DomainError> = validate_account_name("   ");
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_validate_account_name_rejects_overlong() {
    let name: String = "x".repeat(MAX_NAME_LENGTH + 1);
    let result: Result<String, DomainError> = validate_account_name(&name);
    assert!(matches!(result, Err(DomainError::InvalidName(_))));

    let name: String = "x".repeat(MAX_NAME_LENGTH);
    assert!(validate_account_name(&name).is_ok());
}

#[test]
fn test_validate_add_quantity() {
    assert_eq!(validate_add_quantity(1), Ok(1));
    assert_eq!(validate_add_quantity(12), Ok(12));
    assert!(matches!(
        validate_add_quantity(0),
        Err(DomainError::InvalidQuantity(_))
    ));
    assert!(matches!(
        validate_add_quantity(-3),
        Err(DomainError::InvalidQuantity(_))
    ));
    assert!(matches!(
        validate_add_quantity(i64::from(u32::MAX) + 1),
        Err(DomainError::InvalidQuantity(_))
    ));
}

#[test]
fn test_validate_add_quantity_cap() {
    assert_eq!(
        validate_add_quantity(i64::from(MAX_QUANTITY)),
        Ok(MAX_QUANTITY)
    );
    assert!(matches!(
        validate_add_quantity(i64::from(MAX_QUANTITY) + 1),
        Err(DomainError::InvalidQuantity(_))
    ));
    assert!(matches!(
        validate_add_quantity(3_000_000_000),
        Err(DomainError::InvalidQuantity(_))
    ));
}
