//! Input validation helpers
//!
//! Field-level rules live on the payload types (`validator` derive); these
//! helpers cover what derive rules can't express, like whitespace-only text.

use validator::Validate;

use crate::orders::money;
use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Beverage names
pub const MAX_NAME_LEN: usize = 200;

/// Customer names on orders
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Size labels (Small, Medium, 16oz...)
pub const MAX_SIZE_LABEL_LEN: usize = 50;

/// Descriptions, order special instructions
pub const MAX_NOTE_LEN: usize = 500;

/// Per-item notes
pub const MAX_ITEM_NOTE_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Run derive rules and map failures into a 400
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate a catalog price (finite, >= 0, <= 1,000,000)
pub fn validate_price(price: f64) -> Result<(), AppError> {
    money::validate_price(price).map_err(|msg| {
        AppError::with_message(shared::error::ErrorCode::InvalidPrice, msg)
            .with_detail("field", "price")
    })
}
