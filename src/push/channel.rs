//! Named-event dispatch over a push transport.
//!
//! `PushChannel` is the process-scoped handle the views receive by
//! parameter passing. It routes inbound events to handlers registered by
//! event name, mirrors the transport's connection flag, and sends the
//! room-join messages that scope what the backend broadcasts to us.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use super::transport::{PushTransport, TransportError};
use super::wire::ClientMessage;
use crate::order::Order;

type EventHandler = Box<dyn Fn(Order) + Send + Sync>;

pub struct PushChannel {
    transport: Arc<dyn PushTransport>,
    handlers: Arc<DashMap<String, EventHandler>>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl PushChannel {
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self {
            transport,
            handlers: Arc::new(DashMap::new()),
            pump: Mutex::new(None),
        }
    }

    /// Connect the underlying transport and start routing events.
    pub async fn connect(&self) -> Result<(), TransportError> {
        self.transport.connect().await?;
        self.start_pump();
        Ok(())
    }

    fn start_pump(&self) {
        let mut events = self.transport.events();
        let handlers = self.handlers.clone();
        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        let name = event.event_type();
                        if let Some(handler) = handlers.get(name) {
                            handler.value()(event.into_order());
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("push channel lagged, dropped {n} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        if let Ok(mut guard) = self.pump.lock() {
            if let Some(previous) = guard.replace(task) {
                previous.abort();
            }
        }
    }

    /// Register a handler for a named event. Registering the same name again
    /// replaces the previous handler, so re-mounting a view is idempotent.
    pub fn on<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(Order) + Send + Sync + 'static,
    {
        self.handlers.insert(event.into(), Box::new(handler));
    }

    /// Deregister a named handler. No-op when the name is absent.
    pub fn off(&self, event: &str) {
        self.handlers.remove(event);
    }

    /// Ask the backend for every order event. Sent once on dashboard entry.
    pub async fn join_admin(&self) -> Result<(), TransportError> {
        self.transport.send(ClientMessage::JoinAdmin).await
    }

    /// Ask the backend for one customer's order events. The room is keyed by
    /// the lower-cased customer name.
    pub async fn join_order_room(&self, customer_name: &str) -> Result<(), TransportError> {
        self.transport
            .send(ClientMessage::JoinOrderRoom(customer_name.to_lowercase()))
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn watch_connected(&self) -> watch::Receiver<bool> {
        self.transport.watch_connected()
    }

    /// Tear down dispatch and the underlying connection.
    pub async fn close(&self) -> Result<(), TransportError> {
        if let Ok(mut guard) = self.pump.lock() {
            if let Some(task) = guard.take() {
                task.abort();
            }
        }
        self.transport.close().await
    }
}

impl Drop for PushChannel {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.pump.lock() {
            if let Some(task) = guard.take() {
                task.abort();
            }
        }
    }
}
