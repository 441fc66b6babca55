//! Mock push transport for live-update integration testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use orderdesk::push::{
    ClientMessage, ConnectionState, PushTransport, ServerEvent, TransportError,
};

/// An in-memory transport the tests drive by hand: events go in through
/// [`MockPushTransport::push_event`], outbound messages are recorded for
/// inspection, and the connection can be failed or dropped at will.
pub struct MockPushTransport {
    state: Arc<Mutex<ConnectionState>>,
    events_tx: broadcast::Sender<ServerEvent>,
    connected_tx: Arc<watch::Sender<bool>>,
    connected_rx: watch::Receiver<bool>,
    sent: Arc<Mutex<Vec<ClientMessage>>>,
    should_fail_connection: Arc<Mutex<bool>>,
}

impl MockPushTransport {
    pub fn new() -> Self {
        let (events_tx, _) = broadcast::channel(64);
        let (connected_tx, connected_rx) = watch::channel(false);
        Self {
            state: Arc::new(Mutex::new(ConnectionState::Disconnected)),
            events_tx,
            connected_tx: Arc::new(connected_tx),
            connected_rx,
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail_connection: Arc::new(Mutex::new(false)),
        }
    }

    /// Make the next connect attempt fail.
    pub fn set_should_fail_connection(&self, should_fail: bool) {
        *self.should_fail_connection.lock().unwrap() = should_fail;
    }

    /// Deliver one backend event to every subscriber.
    pub fn push_event(&self, event: ServerEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Drop the connection out from under the client.
    pub fn drop_connection(&self) {
        *self.state.lock().unwrap() = ConnectionState::Disconnected;
        let _ = self.connected_tx.send(false);
    }

    pub fn sent_messages(&self) -> Vec<ClientMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushTransport for MockPushTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        if *self.should_fail_connection.lock().unwrap() {
            *self.state.lock().unwrap() = ConnectionState::Failed;
            return Err(TransportError::Connection("mock connect failure".into()));
        }
        *self.state.lock().unwrap() = ConnectionState::Connected;
        let _ = self.connected_tx.send(true);
        Ok(())
    }

    async fn send(&self, message: ClientMessage) -> Result<(), TransportError> {
        if self.state() != ConnectionState::Connected {
            return Err(TransportError::NotConnected);
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        *self.state.lock().unwrap() = ConnectionState::Disconnected;
        let _ = self.connected_tx.send(false);
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap()
    }

    fn events(&self) -> broadcast::Receiver<ServerEvent> {
        self.events_tx.subscribe()
    }

    fn watch_connected(&self) -> watch::Receiver<bool> {
        self.connected_rx.clone()
    }
}
