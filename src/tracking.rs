//! Customer order tracking: one customer's orders against the fixed
//! four-step status progression.
//!
//! Ownership is decided by a case-insensitive name match, both when seeding
//! from the initial fetch and when applying pushed updates. Events for other
//! customers never touch the tracked collection.

use crate::api::{ApiError, OrdersApi};
use crate::notice::{NoticeKind, NoticeLog};
use crate::order::{Order, OrderStatus};

/// One step of the rendered progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStep {
    pub status: OrderStatus,
    pub label: &'static str,
    /// The notice raised when an order reaches this step.
    pub message: &'static str,
}

pub const STATUS_STEPS: [StatusStep; 4] = [
    StatusStep {
        status: OrderStatus::Placed,
        label: "Order Placed",
        message: "Your order has been placed!",
    },
    StatusStep {
        status: OrderStatus::Confirmed,
        label: "Confirmed",
        message: "Your order has been confirmed!",
    },
    StatusStep {
        status: OrderStatus::Preparing,
        label: "Preparing",
        message: "Your order is being prepared!",
    },
    StatusStep {
        status: OrderStatus::Completed,
        label: "Ready",
        message: "Your order is ready for pickup!",
    },
];

/// Progress-bar fill for a status, in percent of the full progression.
pub fn progress_percent(status: OrderStatus) -> f64 {
    status.step_index() as f64 / (STATUS_STEPS.len() - 1) as f64 * 100.0
}

/// Whether a step is marked reached for an order in the given status.
pub fn step_reached(status: OrderStatus, step_index: usize) -> bool {
    step_index <= status.step_index()
}

/// Explicit view states. Error offers retry by navigation only; there is no
/// automatic refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingState {
    Loading,
    Error(String),
    Empty,
    Ready,
}

#[derive(Debug)]
pub struct OrderTracking {
    customer_name: String,
    orders: Vec<Order>,
    state: TrackingState,
    notices: NoticeLog,
}

impl OrderTracking {
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            orders: Vec::new(),
            state: TrackingState::Loading,
            notices: NoticeLog::default(),
        }
    }

    /// Initial fetch. The backend accepts a `customerName` query parameter,
    /// but ownership is re-checked client-side regardless.
    pub async fn load(&mut self, api: &OrdersApi) -> Result<(), ApiError> {
        self.state = TrackingState::Loading;
        match api.list_orders(Some(&self.customer_name)).await {
            Ok(all_orders) => {
                self.orders = all_orders
                    .into_iter()
                    .filter(|order| order.belongs_to(&self.customer_name))
                    .collect();
                self.state = if self.orders.is_empty() {
                    TrackingState::Empty
                } else {
                    TrackingState::Ready
                };
                Ok(())
            }
            Err(error) => {
                tracing::error!("failed to fetch orders for tracking: {error}");
                self.state =
                    TrackingState::Error("Failed to load your orders. Please try again.".to_string());
                Err(error)
            }
        }
    }

    /// `orderUpdated` push event. Applied only when the order belongs to the
    /// tracked customer; replacement is by id with no insert-on-miss. Every
    /// applied update raises a per-status notice.
    pub fn apply_updated(&mut self, order: Order) {
        if !order.belongs_to(&self.customer_name) {
            return;
        }
        let status = order.status;
        if let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) {
            *slot = order;
            self.notices.push(NoticeKind::Success, status_message(status));
        }
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn take_notices(&mut self) -> Vec<crate::notice::Notice> {
        self.notices.drain()
    }
}

fn status_message(status: OrderStatus) -> &'static str {
    STATUS_STEPS[status.step_index()].message
}
