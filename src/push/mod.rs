//! Real-time order updates.
//!
//! The push side of the client:
//! - `wire`: the JSON event envelope shared with the backend
//! - `transport`: connection lifecycle and raw event delivery
//! - `channel`: named-handler dispatch and room membership
//!
//! Events flow backend -> transport read loop -> channel pump -> view
//! handlers. Admin views join the admin room and see everything; customer
//! views join a room keyed by their lower-cased name and see only their own
//! orders.

pub mod channel;
pub mod transport;
pub mod wire;

pub use channel::PushChannel;
pub use transport::{ConnectionState, PushTransport, TransportError, WsTransport};
pub use wire::{ClientMessage, ServerEvent, EVENT_NEW_ORDER, EVENT_ORDER_UPDATED};
