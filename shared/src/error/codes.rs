//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors (beverages, sizes)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Order not found (by id or confirmation number)
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Quantity outside the accepted range
    InvalidQuantity = 4003,
    /// Requested size does not belong to the beverage or is not available
    SizeUnavailable = 4004,
    /// Could not allocate a unique confirmation number
    ConfirmationNumberExhausted = 4005,

    // ==================== 6xxx: Catalog ====================
    BeverageNotFound = 6001,
    BeverageNameExists = 6002,
    SizeNotFound = 6101,
    SizeNameExists = 6102,
    InvalidPrice = 6103,

    // ==================== 9xxx: System ====================
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::InvalidQuantity => "Quantity is out of range",
            ErrorCode::SizeUnavailable => "Requested size is not available",
            ErrorCode::ConfirmationNumberExhausted => {
                "Could not allocate a unique confirmation number"
            }

            // Catalog
            ErrorCode::BeverageNotFound => "Beverage not found",
            ErrorCode::BeverageNameExists => "Beverage with this name already exists",
            ErrorCode::SizeNotFound => "Size not found for this beverage",
            ErrorCode::SizeNameExists => "Size already exists for this beverage",
            ErrorCode::InvalidPrice => "Price is invalid",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::InvalidQuantity),
            4004 => Ok(ErrorCode::SizeUnavailable),
            4005 => Ok(ErrorCode::ConfirmationNumberExhausted),

            // Catalog
            6001 => Ok(ErrorCode::BeverageNotFound),
            6002 => Ok(ErrorCode::BeverageNameExists),
            6101 => Ok(ErrorCode::SizeNotFound),
            6102 => Ok(ErrorCode::SizeNameExists),
            6103 => Ok(ErrorCode::InvalidPrice),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
