//! Wire format for the push channel.
//!
//! Every frame is a JSON envelope tagged by an `event` field with the payload
//! alongside it. The backend broadcasts full order records; the client only
//! sends room-join messages.

use serde::{Deserialize, Serialize};

use crate::order::Order;

/// Messages this client sends to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Subscribe to every order event. Sent once when the dashboard mounts.
    JoinAdmin,
    /// Subscribe to one customer's order events, keyed by the lower-cased
    /// customer name.
    JoinOrderRoom(String),
}

/// Events the backend broadcasts. Payload is always a full order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    NewOrder(Order),
    OrderUpdated(Order),
}

impl ServerEvent {
    /// The event name as it appears on the wire.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NewOrder(_) => "newOrder",
            Self::OrderUpdated(_) => "orderUpdated",
        }
    }

    pub fn order(&self) -> &Order {
        match self {
            Self::NewOrder(order) | Self::OrderUpdated(order) => order,
        }
    }

    pub fn into_order(self) -> Order {
        match self {
            Self::NewOrder(order) | Self::OrderUpdated(order) => order,
        }
    }
}

pub const EVENT_NEW_ORDER: &str = "newOrder";
pub const EVENT_ORDER_UPDATED: &str = "orderUpdated";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn join_messages_serialize_to_tagged_envelopes() {
        let join = serde_json::to_value(ClientMessage::JoinAdmin).unwrap();
        assert_eq!(join, serde_json::json!({ "event": "joinAdmin" }));

        let room = serde_json::to_value(ClientMessage::JoinOrderRoom("alice".to_string())).unwrap();
        assert_eq!(
            room,
            serde_json::json!({ "event": "joinOrderRoom", "payload": "alice" })
        );
    }

    #[test]
    fn server_events_deserialize_from_tagged_envelopes() {
        let frame = serde_json::json!({
            "event": "orderUpdated",
            "payload": {
                "id": "o-1",
                "customerName": "Alice",
                "items": [],
                "totalAmount": 0.0,
                "createdAt": "2026-08-07T12:00:00Z",
                "status": "confirmed"
            }
        });
        let event: ServerEvent = serde_json::from_value(frame).unwrap();
        assert_eq!(event.event_type(), EVENT_ORDER_UPDATED);
        assert_eq!(event.order().status, OrderStatus::Confirmed);
    }
}
