//! Order creation core
//!
//! - [`assembly`] - resolve lines, compute totals, persist atomically
//! - [`snapshot`] - per-line copy of catalog data at order time
//! - [`confirmation`] - confirmation number generation
//! - [`money`] - decimal arithmetic helpers

pub mod assembly;
pub mod confirmation;
pub mod money;
pub mod snapshot;

pub use assembly::{ConfirmationOptions, create_order};
pub use snapshot::ItemSnapshot;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

/// Order creation errors
///
/// `BeverageNotFound` and `SizeUnavailable` stay distinct so callers can
/// tell "doesn't exist" (404) from "exists but not orderable" (400).
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Beverage with ID {0} not found")]
    BeverageNotFound(i64),

    #[error("Size with ID {size_id} not available for beverage {beverage_name}")]
    SizeUnavailable { size_id: i64, beverage_name: String },

    #[error("Order must contain at least one item")]
    Empty,

    #[error("{0}")]
    InvalidQuantity(String),

    #[error("Could not allocate a unique confirmation number after {0} attempts")]
    ConfirmationExhausted(u32),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::BeverageNotFound(id) => {
                AppError::with_message(ErrorCode::BeverageNotFound, message)
                    .with_detail("beverage_id", id)
            }
            OrderError::SizeUnavailable {
                size_id,
                beverage_name,
            } => AppError::with_message(ErrorCode::SizeUnavailable, message)
                .with_detail("size_id", size_id)
                .with_detail("beverage_name", beverage_name),
            OrderError::Empty => AppError::new(ErrorCode::OrderEmpty),
            OrderError::InvalidQuantity(_) => {
                AppError::with_message(ErrorCode::InvalidQuantity, message)
            }
            OrderError::ConfirmationExhausted(_) => {
                AppError::with_message(ErrorCode::ConfirmationNumberExhausted, message)
            }
            OrderError::Repo(e) => e.into(),
        }
    }
}
