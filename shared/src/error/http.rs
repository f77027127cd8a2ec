//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::BeverageNotFound | Self::SizeNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::AlreadyExists | Self::BeverageNameExists | Self::SizeNameExists => {
                StatusCode::CONFLICT
            }

            // 500 Internal Server Error
            Self::ConfirmationNumberExhausted | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and client data errors)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::InvalidQuantity
            | Self::SizeUnavailable
            | Self::InvalidPrice => StatusCode::BAD_REQUEST,
        }
    }
}
