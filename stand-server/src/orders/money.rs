//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored and serialized as `f64`; every calculation goes through
//! `Decimal` and is rounded to 2 decimal places (half away from zero).

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per size
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage/serialization
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// unit price × quantity
pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Validate a catalog price: finite, non-negative, within the ceiling
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() {
        return Err(format!("price must be a finite number, got {price}"));
    }
    if price < 0.0 {
        return Err(format!("price must be non-negative, got {price}"));
    }
    if price > MAX_PRICE {
        return Err(format!(
            "price exceeds maximum allowed ({MAX_PRICE}), got {price}"
        ));
    }
    Ok(())
}

/// Validate an order line quantity
pub fn validate_quantity(quantity: i32) -> Result<(), String> {
    if quantity <= 0 {
        return Err(format!("quantity must be positive, got {quantity}"));
    }
    if quantity > MAX_QUANTITY {
        return Err(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        ));
    }
    Ok(())
}
