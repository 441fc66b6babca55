//! Admin order collection: every order, kept current by push events.
//!
//! The collection is seeded with a fetched snapshot and then only mutated by
//! events. A status change is requested over REST but never applied locally;
//! the confirming `orderUpdated` push event is the sole source of the
//! visible change, so what the admin sees is always what the backend
//! broadcast.

use crate::notice::{NoticeKind, NoticeLog};
use crate::order::{Order, OrderStatus};

/// Derives a view of the collection without mutating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == *status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

/// Per-status counts for the stats tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total: usize,
    pub placed: usize,
    pub confirmed: usize,
    pub preparing: usize,
    pub completed: usize,
}

#[derive(Debug, Default)]
pub struct OrderDashboard {
    orders: Vec<Order>,
    filter: StatusFilter,
    notices: NoticeLog,
}

impl OrderDashboard {
    /// Seed the collection with the initial fetched snapshot.
    pub fn new(initial: Vec<Order>) -> Self {
        Self {
            orders: initial,
            filter: StatusFilter::All,
            notices: NoticeLog::default(),
        }
    }

    /// `newOrder` push event: most-recent-first, so prepend.
    pub fn apply_created(&mut self, order: Order) {
        self.orders.insert(0, order);
        self.notices.push(NoticeKind::Success, "New order received!");
    }

    /// `orderUpdated` push event: replace the matching record wholesale.
    /// An event for an unknown id is dropped; there is no insert-on-miss.
    pub fn apply_updated(&mut self, order: Order) {
        if let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) {
            *slot = order;
            self.notices.push(NoticeKind::Info, "Order status updated");
        } else {
            tracing::debug!("dropping update for unknown order {}", order.id);
        }
    }

    /// Record a failed status-change request. Local state is left as it was;
    /// it stays stale until a push event arrives.
    pub fn report_update_failure(&mut self) {
        self.notices
            .push(NoticeKind::Alert, "Failed to update order status");
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// The orders visible under the current filter.
    pub fn filtered(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| self.filter.matches(order))
            .collect()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn stats(&self) -> OrderStats {
        let mut stats = OrderStats {
            total: self.orders.len(),
            ..OrderStats::default()
        };
        for order in &self.orders {
            match order.status {
                OrderStatus::Placed => stats.placed += 1,
                OrderStatus::Confirmed => stats.confirmed += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Completed => stats.completed += 1,
            }
        }
        stats
    }

    pub fn take_notices(&mut self) -> Vec<crate::notice::Notice> {
        self.notices.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use pretty_assertions::assert_eq;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            customer_name: "Alice".to_string(),
            customer_email: None,
            items: vec![],
            total_amount: 12.99,
            created_at: "2026-08-07T12:00:00Z".to_string(),
            status,
        }
    }

    #[test]
    fn new_order_is_prepended() {
        let mut dashboard = OrderDashboard::new(vec![order("a", OrderStatus::Placed)]);
        dashboard.apply_created(order("b", OrderStatus::Placed));

        let ids: Vec<&str> = dashboard.orders().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn update_for_unknown_id_is_dropped() {
        let mut dashboard = OrderDashboard::new(vec![order("a", OrderStatus::Placed)]);
        dashboard.apply_updated(order("ghost", OrderStatus::Confirmed));

        assert_eq!(dashboard.orders().len(), 1);
        assert_eq!(dashboard.orders()[0].id, "a");
        assert_eq!(dashboard.orders()[0].status, OrderStatus::Placed);
        // A dropped event raises no notice either.
        assert!(dashboard.take_notices().is_empty());
    }

    #[test]
    fn matching_update_replaces_wholesale() {
        let mut dashboard = OrderDashboard::new(vec![order("a", OrderStatus::Placed)]);
        let mut updated = order("a", OrderStatus::Preparing);
        updated.total_amount = 25.98;
        dashboard.apply_updated(updated);

        assert_eq!(dashboard.orders().len(), 1);
        assert_eq!(dashboard.orders()[0].status, OrderStatus::Preparing);
        assert!((dashboard.orders()[0].total_amount - 25.98).abs() < 1e-9);
    }

    #[test]
    fn duplicate_update_reapplies_idempotently() {
        let mut dashboard = OrderDashboard::new(vec![order("a", OrderStatus::Placed)]);
        let updated = order("a", OrderStatus::Confirmed);
        dashboard.apply_updated(updated.clone());
        dashboard.apply_updated(updated);

        assert_eq!(dashboard.orders().len(), 1);
        assert_eq!(dashboard.orders()[0].status, OrderStatus::Confirmed);
    }

    #[test]
    fn filter_derives_without_mutating() {
        let mut dashboard = OrderDashboard::new(vec![
            order("a", OrderStatus::Placed),
            order("b", OrderStatus::Completed),
            order("c", OrderStatus::Placed),
        ]);
        dashboard.set_filter(StatusFilter::Only(OrderStatus::Placed));

        let visible: Vec<&str> = dashboard.filtered().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(visible, vec!["a", "c"]);
        assert_eq!(dashboard.orders().len(), 3);
    }

    #[test]
    fn stats_count_per_status() {
        let dashboard = OrderDashboard::new(vec![
            order("a", OrderStatus::Placed),
            order("b", OrderStatus::Preparing),
            order("c", OrderStatus::Preparing),
            order("d", OrderStatus::Completed),
        ]);
        let stats = dashboard.stats();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.placed, 1);
        assert_eq!(stats.confirmed, 0);
        assert_eq!(stats.preparing, 2);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn events_raise_transient_notices() {
        let mut dashboard = OrderDashboard::new(vec![order("a", OrderStatus::Placed)]);
        dashboard.apply_created(order("b", OrderStatus::Placed));
        dashboard.apply_updated(order("a", OrderStatus::Confirmed));
        dashboard.report_update_failure();

        let notices = dashboard.take_notices();
        let kinds: Vec<NoticeKind> = notices.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NoticeKind::Success, NoticeKind::Info, NoticeKind::Alert]
        );
        assert!(dashboard.take_notices().is_empty());
    }
}
