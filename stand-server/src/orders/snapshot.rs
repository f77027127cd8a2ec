//! Order line snapshot
//!
//! Captures beverage name, size label and unit price as they are when the
//! order is placed. Persisted items are copies of this value; later catalog
//! edits or deletes never reach them.

use rust_decimal::Decimal;
use shared::models::{BeverageDetail, BeverageSize, OrderItemInput};

use super::money::{line_subtotal, round_money, to_decimal};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    pub beverage_id: i64,
    pub beverage_size_id: i64,
    pub beverage_name: String,
    pub beverage_size: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub notes: Option<String>,
}

impl ItemSnapshot {
    /// Snapshot a requested line against a resolved beverage and size.
    ///
    /// The unit price is rounded to cents first, so the stored
    /// `unit_price × quantity` always equals the stored subtotal.
    pub fn capture(beverage: &BeverageDetail, size: &BeverageSize, input: &OrderItemInput) -> Self {
        let unit_price = round_money(to_decimal(size.price));
        Self {
            beverage_id: beverage.beverage.id,
            beverage_size_id: size.id,
            beverage_name: beverage.beverage.name.clone(),
            beverage_size: size.size.clone(),
            unit_price,
            quantity: input.quantity,
            subtotal: line_subtotal(unit_price, input.quantity),
            notes: input.notes.clone(),
        }
    }
}

/// Σ subtotals
pub fn order_total(items: &[ItemSnapshot]) -> Decimal {
    items.iter().map(|i| i.subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Beverage;

    fn beverage() -> BeverageDetail {
        BeverageDetail {
            beverage: Beverage {
                id: 1,
                name: "Classic Lemonade".into(),
                description: None,
                is_active: true,
                created_at: 0,
                updated_at: 0,
            },
            sizes: vec![
                BeverageSize {
                    id: 10,
                    beverage_id: 1,
                    size: "Small".into(),
                    price: 2.0,
                    is_available: true,
                    created_at: 0,
                    updated_at: 0,
                },
                BeverageSize {
                    id: 11,
                    beverage_id: 1,
                    size: "Medium".into(),
                    price: 3.0,
                    is_available: true,
                    created_at: 0,
                    updated_at: 0,
                },
            ],
        }
    }

    fn input(size_id: i64, quantity: i32) -> OrderItemInput {
        OrderItemInput {
            beverage_id: 1,
            beverage_size_id: size_id,
            quantity,
            notes: Some("extra ice".into()),
        }
    }

    #[test]
    fn test_capture_and_total() {
        let b = beverage();
        let small = ItemSnapshot::capture(&b, &b.sizes[0], &input(10, 2));
        let medium = ItemSnapshot::capture(&b, &b.sizes[1], &input(11, 1));

        assert_eq!(small.beverage_name, "Classic Lemonade");
        assert_eq!(small.beverage_size, "Small");
        assert_eq!(small.subtotal, Decimal::new(400, 2));
        assert_eq!(small.notes.as_deref(), Some("extra ice"));
        assert_eq!(medium.subtotal, Decimal::new(300, 2));
        assert_eq!(order_total(&[small, medium]), Decimal::new(700, 2));
    }

    #[test]
    fn test_sub_cent_price_rounds_before_multiplying() {
        let mut b = beverage();
        b.sizes[0].price = 0.125;
        let snap = ItemSnapshot::capture(&b, &b.sizes[0], &input(10, 2));

        assert_eq!(snap.unit_price, Decimal::new(13, 2));
        assert_eq!(snap.subtotal, Decimal::new(26, 2));
        assert_eq!(snap.unit_price * Decimal::from(snap.quantity), snap.subtotal);
        assert_eq!(order_total(&[snap]), Decimal::new(26, 2));
    }

    #[test]
    fn test_snapshot_is_detached_from_catalog() {
        let mut b = beverage();
        let snap = ItemSnapshot::capture(&b, &b.sizes[0], &input(10, 1));
        b.sizes[0].price = 99.0;
        b.beverage.name = "Renamed".into();
        assert_eq!(snap.unit_price, Decimal::new(200, 2));
        assert_eq!(snap.beverage_name, "Classic Lemonade");
    }
}
