use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_json::Value;
use utoipa::ToSchema;

use super::errors::DomainError;

/// Lifecycle state of a Mini App order. Orders are created `Pending`; the
/// other states are set by the bot owner's order management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::Internal(format!("Unknown order status '{}'", other))),
        }
    }
}

/// Documented shape of one cart line as the Mini App sends it. Only used for
/// the OpenAPI schema; stored orders keep the client's JSON as is, see
/// [`OrderItems`].
#[derive(ToSchema)]
pub struct OrderItem {
    /// Catalog entry the line was picked from.
    pub id: Option<i64>,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Cart lines exactly as the client sent them. They are persisted as JSON
/// text without being reshaped; only the owner notification reads fields
/// out of them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItems(Value);

impl OrderItems {
    /// `None` unless `value` is a non-empty array.
    pub fn new(value: Value) -> Option<Self> {
        match &value {
            Value::Array(lines) if !lines.is_empty() => Some(Self(value)),
            _ => None,
        }
    }

    pub fn from_text(text: &str) -> Result<Self, DomainError> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn to_text(&self) -> String {
        self.0.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none()
    }

    /// Array elements; anything that is not an array has no lines.
    pub fn lines(&self) -> impl Iterator<Item = &Value> {
        self.0.as_array().into_iter().flatten()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub bot_id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub note: Option<String>,
    pub items: OrderItems,
    pub total_amount: f64,
    pub telegram_user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: i32,
    pub bot_id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub note: Option<String>,
    pub items: OrderItems,
    pub total_amount: f64,
    pub telegram_user_id: Option<String>,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            "shipped".parse::<OrderStatus>(),
            Err(DomainError::Internal(_))
        ));
    }

    #[test]
    fn items_must_be_a_non_empty_array() {
        assert!(OrderItems::new(json!([])).is_none());
        assert!(OrderItems::new(json!({"name": "Non"})).is_none());
        assert!(OrderItems::new(json!("Non x2")).is_none());
        assert!(OrderItems::new(Value::Null).is_none());
        assert!(OrderItems::new(json!([{"name": "Non"}])).is_some());
    }

    #[test]
    fn items_text_keeps_client_json_as_sent() {
        let items = OrderItems::new(json!([
            {"id": 10, "name": "Manti", "price": 25000, "quantity": "2", "image": "/img/manti.jpg"}
        ]))
        .unwrap();

        assert_eq!(
            items.to_text(),
            r#"[{"id":10,"name":"Manti","price":25000,"quantity":"2","image":"/img/manti.jpg"}]"#
        );
        assert_eq!(OrderItems::from_text(&items.to_text()).unwrap(), items);
    }

    #[test]
    fn stored_non_array_items_have_no_lines() {
        let items = OrderItems::from_text(r#"{"name": "Non"}"#).unwrap();
        assert!(items.is_empty());
        assert!(OrderItems::from_text("not json").is_err());
    }
}
