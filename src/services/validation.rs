//! Field validation shared by the write paths
//!
//! Each helper records a message against the field name and hands back the
//! cleaned value, so a handler can report every problem in one response.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RanchError;
use crate::models::error::FieldError;

/// Max decimal places accepted for weights, prices and costs
pub const MONEY_SCALE: u32 = 2;

/// Largest weight, unit price or cost a `decimal(12,2)` column holds
pub const MAX_AMOUNT: Decimal = dec!(9999999999.99);

/// Max length of an animal tag
pub const MAX_TAG_LENGTH: usize = 64;

/// Max length of short names (lots, products, quantities)
pub const MAX_NAME_LENGTH: usize = 120;

/// Max length of an application quantity ("5 ml")
pub const MAX_QUANTITY_LENGTH: usize = 64;

/// Trim, drop control characters and collapse inner whitespace
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Optional free text; blank becomes None
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), RanchError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RanchError::Validation(self.errors))
        }
    }

    /// Required, non-blank text no longer than `max_len`
    pub fn require_text(&mut self, field: &str, value: Option<&str>, max_len: usize) -> Option<String> {
        let cleaned = value.map(sanitize_input).unwrap_or_default();
        if cleaned.is_empty() {
            self.push(field, "is required");
            return None;
        }
        if cleaned.chars().count() > max_len {
            self.push(field, format!("cannot exceed {} characters", max_len));
            return None;
        }
        Some(cleaned)
    }

    pub fn require<T: Copy>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "is required");
        }
        value
    }

    /// Required amount strictly greater than zero
    pub fn require_positive(&mut self, field: &str, value: Option<Decimal>) -> Option<Decimal> {
        let value = self.require(field, value)?;
        self.check_positive(field, value)
    }

    pub fn check_positive(&mut self, field: &str, value: Decimal) -> Option<Decimal> {
        if value <= Decimal::ZERO {
            self.push(field, "must be greater than 0");
            return None;
        }
        self.check_bounds(field, value)
    }

    /// Optional amount that may be zero but not negative
    pub fn optional_non_negative(&mut self, field: &str, value: Option<Decimal>) -> Option<Decimal> {
        let value = value?;
        if value < Decimal::ZERO {
            self.push(field, "cannot be negative");
            return None;
        }
        self.check_bounds(field, value)
    }

    fn check_bounds(&mut self, field: &str, value: Decimal) -> Option<Decimal> {
        if value > MAX_AMOUNT {
            self.push(field, format!("cannot exceed {}", MAX_AMOUNT));
            return None;
        }
        self.check_scale(field, value)
    }

    fn check_scale(&mut self, field: &str, value: Decimal) -> Option<Decimal> {
        if value.normalize().scale() > MONEY_SCALE {
            self.push(field, format!("cannot have more than {} decimal places", MONEY_SCALE));
            return None;
        }
        Some(value)
    }

    pub fn not_in_future(&mut self, field: &str, date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
        if date > today {
            self.push(field, "cannot be in the future");
            return None;
        }
        Some(date)
    }
}
