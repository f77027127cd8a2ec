//! Order & Order Item Models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

/// Order entity (顾客订单)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub confirmation_number: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub special_instructions: Option<String>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item: beverage name, size label and unit price are copied
/// at creation and never follow later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub beverage_id: i64,
    pub beverage_size_id: i64,
    pub beverage_name: String,
    pub beverage_size: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub subtotal: f64,
    pub notes: Option<String>,
}

/// Order with items (API response)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// Σ quantity across all items
    pub items_count: i64,
    /// e.g. `2x Classic Lemonade (Small), 1x Classic Lemonade (Medium)`
    pub summary: String,
}

impl OrderDetail {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        let items_count = items.iter().map(|i| i64::from(i.quantity)).sum();
        let summary = summarize(&items);
        Self {
            order,
            items,
            items_count,
            summary,
        }
    }
}

fn summarize(items: &[OrderItem]) -> String {
    if items.is_empty() {
        return "No items".to_string();
    }
    items
        .iter()
        .map(|i| format!("{}x {} ({})", i.quantity, i.beverage_name, i.beverage_size))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[validate(length(min = 2, max = 100))]
    pub customer_name: String,
    #[validate(email, length(max = 254))]
    pub customer_contact: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemInput>,
    #[validate(length(max = 500))]
    pub special_instructions: Option<String>,
}

impl OrderCreate {
    /// Trim free text and lower-case the contact email
    pub fn normalize(&mut self) {
        self.customer_name = self.customer_name.trim().to_string();
        self.customer_contact = self.customer_contact.trim().to_lowercase();
        self.special_instructions = self
            .special_instructions
            .take()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        for item in &mut self.items {
            item.notes = item
                .notes
                .take()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
        }
    }
}

/// One requested line of an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub beverage_id: i64,
    pub beverage_size_id: i64,
    #[validate(range(min = 1, max = 9999))]
    pub quantity: i32,
    #[serde(default, alias = "itemNotes")]
    #[validate(length(max = 200))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: i32, name: &str, size: &str) -> OrderItem {
        OrderItem {
            id: 0,
            order_id: 1,
            beverage_id: 1,
            beverage_size_id: 1,
            beverage_name: name.into(),
            beverage_size: size.into(),
            unit_price: 2.0,
            quantity: qty,
            subtotal: 2.0 * f64::from(qty),
            notes: None,
        }
    }

    fn order() -> Order {
        Order {
            id: 1,
            confirmation_number: "LS-1-ABCDEFGH".into(),
            customer_name: "Ann".into(),
            customer_contact: "ann@example.com".into(),
            special_instructions: None,
            total_price: 7.0,
            status: OrderStatus::Pending,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn payload(json: &str) -> OrderCreate {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_summary_and_count() {
        let detail = OrderDetail::new(
            order(),
            vec![
                item(2, "Classic Lemonade", "Small"),
                item(1, "Classic Lemonade", "Medium"),
            ],
        );
        assert_eq!(detail.items_count, 3);
        assert_eq!(
            detail.summary,
            "2x Classic Lemonade (Small), 1x Classic Lemonade (Medium)"
        );
    }

    #[test]
    fn test_summary_empty() {
        let detail = OrderDetail::new(order(), vec![]);
        assert_eq!(detail.items_count, 0);
        assert_eq!(detail.summary, "No items");
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
        let json = serde_json::to_value(OrderDetail::new(order(), vec![])).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["confirmationNumber"], "LS-1-ABCDEFGH");
        assert_eq!(json["itemsCount"], 0);
    }

    #[test]
    fn test_normalize_contact() {
        let mut p = payload(
            r#"{"customerName":"  Ann  ","customerContact":"  Ann@Example.COM ",
                "items":[{"beverageId":1,"beverageSizeId":2,"quantity":1,"itemNotes":"  "}],
                "specialInstructions":" no ice "}"#,
        );
        p.normalize();
        assert_eq!(p.customer_name, "Ann");
        assert_eq!(p.customer_contact, "ann@example.com");
        assert_eq!(p.special_instructions.as_deref(), Some("no ice"));
        assert!(p.items[0].notes.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation_rules() {
        let p = payload(
            r#"{"customerName":"A","customerContact":"not-an-email","items":[]}"#,
        );
        let errors = p.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("customer_name"));
        assert!(fields.contains_key("customer_contact"));
        assert!(fields.contains_key("items"));

        let p = payload(
            r#"{"customerName":"Ann","customerContact":"ann@example.com",
                "items":[{"beverageId":1,"beverageSizeId":1,"quantity":0}]}"#,
        );
        assert!(p.validate().is_err());

        let p = payload(
            r#"{"customerName":"Ann","customerContact":"ann@example.com",
                "items":[{"beverageId":1,"beverageSizeId":1,"quantity":10000}]}"#,
        );
        assert!(p.validate().is_err());
    }
}
