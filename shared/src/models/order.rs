//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status
///
/// Staff may move an order between any of the three values; there is no
/// forward-only enforcement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Waiting,
    Ready,
    Paid,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Waiting, Self::Ready, Self::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Ready => "ready",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the three order statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOrderStatus(pub String);

impl fmt::Display for InvalidOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order status: {}", self.0)
    }
}

impl std::error::Error for InvalidOrderStatus {}

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "ready" => Ok(Self::Ready),
            "paid" => Ok(Self::Paid),
            other => Err(InvalidOrderStatus(other.to_string())),
        }
    }
}

/// Order line item (dish name + price)
///
/// Two items are duplicates when both name and numeric price are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    /// Price rounded to 2 decimal places, always positive
    pub price: Decimal,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub table_number: i64,
    pub items: Vec<OrderItem>,
    /// Always the sum of `items[*].price`
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Item as submitted by a client
///
/// Leaf values stay raw so malformed names and prices can be reported
/// per item instead of rejecting the whole body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOrderItem {
    #[serde(default)]
    pub name: serde_json::Value,
    #[serde(default)]
    pub price: serde_json::Value,
}

impl RawOrderItem {
    pub fn new(name: impl Into<serde_json::Value>, price: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

/// Create order payload
///
/// `table_number` and `status` stay raw like item leaves, so a wrong type
/// is reported as a validation error on that field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub table_number: serde_json::Value,
    #[serde(default)]
    pub items: Vec<RawOrderItem>,
    /// Defaults to `waiting` when omitted or null
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

/// Customer update payload
///
/// Unknown fields such as `status` and `total_price` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub items: Vec<RawOrderItem>,
    /// Retained when omitted or null
    #[serde(default)]
    pub table_number: Option<serde_json::Value>,
}

/// Staff update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffOrderUpdate {
    /// Indices into the current item list, applied before new items are merged
    #[serde(default)]
    pub remove_indices: Vec<usize>,
    #[serde(default)]
    pub items: Vec<RawOrderItem>,
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub table_number: Option<serde_json::Value>,
}

/// List/search query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Free text: digits match table number or id, words match a status
    pub q: Option<String>,
    pub status: Option<String>,
    pub table_number: Option<i64>,
    /// `id`, `table_number`, `total_price`, `status` or `created_at`,
    /// optionally prefixed with `-` for descending
    pub ordering: Option<String>,
}

/// Revenue over paid orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total_revenue: Decimal,
    pub paid_orders: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("Waiting".parse::<OrderStatus>().is_err());
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Ready).unwrap();
        assert_eq!(json, "\"ready\"");
        assert_eq!(OrderStatus::default(), OrderStatus::Waiting);
    }

    #[test]
    fn order_total_serializes_as_string() {
        let order = Order {
            id: 1,
            table_number: 2,
            items: vec![OrderItem::new("Tea", Decimal::new(300, 2))],
            total_price: Decimal::new(300, 2),
            status: OrderStatus::Waiting,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["total_price"], "3.00");
        assert_eq!(json["items"][0]["price"], "3.00");
        assert_eq!(json["status"], "waiting");
    }

    #[test]
    fn raw_item_keeps_malformed_values() {
        let body = r#"{"table_number": 1, "items": [{"name": 123, "price": "abc"}, {}]}"#;
        let create: OrderCreate = serde_json::from_str(body).unwrap();
        assert_eq!(create.items.len(), 2);
        assert_eq!(create.items[0].name, serde_json::json!(123));
        assert!(create.items[1].price.is_null());
        assert!(create.status.is_none());
    }

    #[test]
    fn create_keeps_malformed_table_and_status() {
        let body = r#"{"table_number": "x", "status": 7}"#;
        let create: OrderCreate = serde_json::from_str(body).unwrap();
        assert_eq!(create.table_number, serde_json::json!("x"));
        assert_eq!(create.status, Some(serde_json::json!(7)));
        assert!(create.items.is_empty());

        let missing: OrderCreate = serde_json::from_str("{}").unwrap();
        assert!(missing.table_number.is_null());
    }

    #[test]
    fn staff_update_defaults_to_empty_lists() {
        let update: StaffOrderUpdate = serde_json::from_str(r#"{"status": "paid"}"#).unwrap();
        assert!(update.remove_indices.is_empty());
        assert!(update.items.is_empty());
        assert_eq!(update.status, Some(serde_json::json!("paid")));
        assert_eq!(update.table_number, None);
    }
}
