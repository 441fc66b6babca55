//! Order domain model shared by the composer, dashboard, and tracking views.
//!
//! Orders are owned by the backend; this client only renders what it is told.
//! All wire types serialize camelCase to match the backend JSON format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of an order.
///
/// The backend only ever advances an order forward through
/// placed -> confirmed -> preparing -> completed. This client does not
/// enforce the progression; it renders whatever status arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Preparing,
    Completed,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Completed => "completed",
        }
    }

    pub const fn all() -> &'static [OrderStatus] {
        &[
            OrderStatus::Placed,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Completed,
        ]
    }

    /// Zero-based position in the four-step progression.
    pub fn step_index(&self) -> usize {
        match self {
            Self::Placed => 0,
            Self::Confirmed => 1,
            Self::Preparing => 2,
            Self::Completed => 3,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "placed" => Ok(Self::Placed),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("unknown order status: {value}")),
        }
    }
}

/// One line of an order. Owned by its parent order; has no identity of its
/// own beyond position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// A customer's submitted purchase request as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    /// RFC 3339 timestamp assigned by the backend.
    pub created_at: String,
    pub status: OrderStatus,
}

impl Order {
    /// Short display id: the last six characters, upper-cased.
    pub fn short_id(&self) -> String {
        let start = self.id.len().saturating_sub(6);
        self.id[start..].to_uppercase()
    }

    /// Human-readable local timestamp, falling back to the raw value when the
    /// backend sends something unparseable.
    pub fn created_at_display(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%b %e, %Y %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|_| self.created_at.clone())
    }

    /// Case-insensitive ownership check used by the customer-scoped views.
    pub fn belongs_to(&self, customer_name: &str) -> bool {
        self.customer_name.eq_ignore_ascii_case(customer_name)
    }
}
