//! HTTP middleware

mod logging;

pub use logging::{PlacedOrder, logging_middleware};
