// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column encodings shared by queries and mutations.
//!
//! Timestamps are stored as RFC 3339 UTC text truncated to whole seconds,
//! so that text comparison orders them correctly on every backend.
//! Money is stored as canonical decimal text.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::PersistenceError;

pub fn encode_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn decode_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::SerializationError(format!("Invalid timestamp '{value}': {e}"))
    })
}

pub fn encode_money(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn decode_money(value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| {
        PersistenceError::SerializationError(format!("Invalid amount '{value}': {e}"))
    })
}

pub fn encode_quantity(quantity: u32) -> Result<i32, PersistenceError> {
    quantity.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("Quantity {quantity} out of range"))
    })
}

pub fn decode_quantity(quantity: i32) -> Result<u32, PersistenceError> {
    quantity.to_u32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("Stored quantity {quantity} is negative"))
    })
}

pub fn encode_line_no(index: usize) -> Result<i32, PersistenceError> {
    index.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("Line number {index} out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_timestamps_drop_fraction_and_offset() {
        let value: OffsetDateTime = datetime!(2026-03-14 20:30:15.75 +08:00);
        let encoded: Result<String, PersistenceError> = encode_timestamp(value);
        assert_eq!(encoded.as_deref(), Ok("2026-03-14T12:30:15Z"));
    }

    #[test]
    fn test_encoded_timestamps_sort_as_text() {
        let earlier: String = encode_timestamp(datetime!(2026-03-14 09:59:59.9 UTC)).unwrap_or_default();
        let later: String = encode_timestamp(datetime!(2026-03-14 10:00:00 UTC)).unwrap_or_default();
        assert!(earlier < later);
    }

    #[test]
    fn test_money_is_canonical() {
        assert_eq!(encode_money(Decimal::new(7000, 2)), "70");
        assert_eq!(encode_money(Decimal::new(5550, 2)), "55.5");
        assert_eq!(decode_money("55.5"), Ok(Decimal::new(555, 1)));
        assert!(decode_money("abc").is_err());
    }

    #[test]
    fn test_quantity_range() {
        assert_eq!(encode_quantity(3), Ok(3));
        assert!(encode_quantity(u32::MAX).is_err());
        assert!(decode_quantity(-1).is_err());
    }
}
