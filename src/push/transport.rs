//! Push transport: the long-lived connection order events arrive over.
//!
//! `PushTransport` is the seam the views are tested against; `WsTransport`
//! is the production implementation over a WebSocket. The transport owns
//! connection state and raw event delivery; room membership and handler
//! dispatch live in [`super::channel`].
//!
//! A lost connection is not an error the user is asked about. It flips the
//! observable connection flag and live updates stop until the process is
//! restarted; every view keeps working from the state it already holds.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use super::wire::{ClientMessage, ServerEvent};

const EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport is not connected")]
    NotConnected,
    #[error("connection error: {0}")]
    Connection(String),
    #[error("send failed: {0}")]
    Send(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Contract for the push connection shared by every live view.
///
/// One connection per session; create once, tear down on every exit path.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Open the connection and start delivering events.
    async fn connect(&self) -> Result<(), TransportError>;

    /// Send one client message (room joins).
    async fn send(&self, message: ClientMessage) -> Result<(), TransportError>;

    /// Close the connection and release the underlying resources.
    async fn close(&self) -> Result<(), TransportError>;

    fn state(&self) -> ConnectionState;

    /// New receiver over the inbound event feed.
    fn events(&self) -> broadcast::Receiver<ServerEvent>;

    /// Observable connection flag; resolves immediately to the current value.
    fn watch_connected(&self) -> watch::Receiver<bool>;

    fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }
}

/// WebSocket push transport.
pub struct WsTransport {
    url: String,
    state: Arc<Mutex<ConnectionState>>,
    events_tx: broadcast::Sender<ServerEvent>,
    connected_tx: Arc<watch::Sender<bool>>,
    connected_rx: watch::Receiver<bool>,
    outbound: Arc<Mutex<Option<mpsc::UnboundedSender<Message>>>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl WsTransport {
    pub fn new(url: impl Into<String>) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_BUFFER);
        let (connected_tx, connected_rx) = watch::channel(false);
        Self {
            url: url.into(),
            state: Arc::new(Mutex::new(ConnectionState::Disconnected)),
            events_tx,
            connected_tx: Arc::new(connected_tx),
            connected_rx,
            outbound: Arc::new(Mutex::new(None)),
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn set_state(state: &Mutex<ConnectionState>, value: ConnectionState) {
        if let Ok(mut guard) = state.lock() {
            *guard = value;
        }
    }
}

#[async_trait]
impl PushTransport for WsTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        Self::set_state(&self.state, ConnectionState::Connecting);

        let (stream, _) = connect_async(self.url.as_str()).await.map_err(|error| {
            Self::set_state(&self.state, ConnectionState::Failed);
            TransportError::Connection(error.to_string())
        })?;
        info!("push channel connected to {}", self.url);

        let (mut sink, mut source) = stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        if let Ok(mut guard) = self.outbound.lock() {
            *guard = Some(outbound_tx);
        }

        let writer = tokio::spawn(async move {
            while let Some(message) = outbound_rx.recv().await {
                if let Err(error) = sink.send(message).await {
                    warn!("push channel write failed: {error}");
                    break;
                }
            }
        });

        let events_tx = self.events_tx.clone();
        let state = self.state.clone();
        let connected_tx = self.connected_tx.clone();
        let reader = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => {
                            debug!("push event received: {}", event.event_type());
                            let _ = events_tx.send(event);
                        }
                        Err(error) => {
                            debug!("ignoring unrecognized push frame: {error}");
                        }
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(error) => {
                        warn!("push channel read failed: {error}");
                        break;
                    }
                }
            }
            // Degrade silently: flip the indicator, keep the views alive.
            Self::set_state(&state, ConnectionState::Disconnected);
            let _ = connected_tx.send(false);
            warn!("push channel disconnected; live updates stopped");
        });

        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(writer);
            guard.push(reader);
        }

        Self::set_state(&self.state, ConnectionState::Connected);
        let _ = self.connected_tx.send(true);
        Ok(())
    }

    async fn send(&self, message: ClientMessage) -> Result<(), TransportError> {
        let text = serde_json::to_string(&message)
            .map_err(|error| TransportError::Serialization(error.to_string()))?;
        let sender = match self.outbound.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        let sender = sender.ok_or(TransportError::NotConnected)?;
        sender
            .send(Message::Text(text))
            .map_err(|error| TransportError::Send(error.to_string()))
    }

    async fn close(&self) -> Result<(), TransportError> {
        if let Ok(mut guard) = self.outbound.lock() {
            guard.take();
        }
        if let Ok(mut guard) = self.tasks.lock() {
            for task in guard.drain(..) {
                task.abort();
            }
        }
        Self::set_state(&self.state, ConnectionState::Disconnected);
        let _ = self.connected_tx.send(false);
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.state
            .lock()
            .map(|guard| *guard)
            .unwrap_or(ConnectionState::Failed)
    }

    fn events(&self) -> broadcast::Receiver<ServerEvent> {
        self.events_tx.subscribe()
    }

    fn watch_connected(&self) -> watch::Receiver<bool> {
        self.connected_rx.clone()
    }
}
