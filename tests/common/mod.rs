//! Shared helpers for integration tests.

pub mod mock_push;

use orderdesk::order::{Order, OrderItem, OrderStatus};

/// Build an order the way the backend would report it.
pub fn order(id: &str, customer: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        customer_name: customer.to_string(),
        customer_email: None,
        items: vec![OrderItem {
            name: "Pizza Margherita".to_string(),
            price: 12.99,
            quantity: 1,
        }],
        total_amount: 12.99,
        created_at: "2026-08-07T12:00:00Z".to_string(),
        status,
    }
}
