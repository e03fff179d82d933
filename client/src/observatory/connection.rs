// Feed socket lifecycle.
//
// One supervisor task owns the whole connection: dial, drive, reconnect.
// Because there is exactly one supervisor loop per session, there can
// never be more than one pending reconnect, and the heartbeat only exists
// while the socket it belongs to is open. All signal writes happen on the
// UI executor; the only detached tokio task is the writer, which owns no
// signals.

use dioxus::core::Task;
use dioxus::prelude::*;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use observatory_shared::{ClientMessage, ServerMessage, Snapshot};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::normalize;
use super::ObservatorySession;
use crate::error::FeedError;

pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Reconnecting,
}

impl ConnectionState {
    pub fn is_open(self) -> bool {
        self == ConnectionState::Open
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "live",
            ConnectionState::Reconnecting => "reconnecting",
        }
    }
}

/// Outbound frames leave only through an open socket.
fn may_transmit(state: ConnectionState) -> bool {
    state.is_open()
}

#[derive(Clone, Copy, PartialEq)]
pub struct ConnectionManager {
    state: Signal<ConnectionState>,
    outbound: Signal<Option<UnboundedSender<ClientMessage>>>,
    supervisor: Signal<Option<Task>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            state: Signal::new(ConnectionState::Disconnected),
            outbound: Signal::new(None),
            supervisor: Signal::new(None),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Start the supervisor. Idempotent: while one is already running
    /// (anything but Disconnected) this is a no-op.
    pub fn connect(&mut self, session: ObservatorySession) {
        if self.state() != ConnectionState::Disconnected {
            debug!("[ws] connect ignored, already {}", self.state().label());
            return;
        }
        let mgr = *self;
        let task = spawn(async move { mgr.supervise(session).await });
        self.supervisor.set(Some(task));
    }

    async fn supervise(mut self, session: ObservatorySession) {
        let url = session.config().ws_url();
        loop {
            self.state.set(ConnectionState::Connecting);
            info!("[ws] connecting to {url}");

            match connect_async(url.as_str()).await {
                Ok((stream, _resp)) => {
                    self.drive(stream, session).await;
                    info!("[ws] connection closed");
                }
                Err(e) => {
                    let e = FeedError::Connection(e.to_string());
                    warn!("[ws] {e}");
                }
            }

            self.outbound.set(None);
            self.state.set(ConnectionState::Reconnecting);
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    /// Drive one open socket until it dies: request an update right away,
    /// ping on the heartbeat interval, hand every update frame to the
    /// session.
    async fn drive(
        &mut self,
        stream: tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
        session: ObservatorySession,
    ) {
        let mut session = session;
        let (mut write, mut read) = stream.split();

        let (tx, mut rx) = mpsc::unbounded_channel::<ClientMessage>();
        let writer = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let Ok(text) = serde_json::to_string(&msg) else {
                    continue;
                };
                if write.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        });

        self.outbound.set(Some(tx));
        self.state.set(ConnectionState::Open);
        self.send(ClientMessage::RequestUpdate);

        // TODO: force a reconnect when a ping goes unanswered past a
        // deadline; today a half-open socket stays Open until TCP notices.
        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        heartbeat.tick().await; // the first tick completes immediately

        loop {
            tokio::select! {
                item = read.next() => {
                    let Some(item) = item else { break };
                    match item {
                        Ok(Message::Text(text)) => match decode_frame(&text) {
                            Ok(snapshot) => session.apply_live(snapshot),
                            Err(e) => debug!("[ws] {e}"),
                        },
                        Ok(Message::Close(_)) => break,
                        Ok(_) => {} // binary/ping/pong frames are not part of the feed
                        Err(e) => {
                            let e = FeedError::Connection(e.to_string());
                            warn!("[ws] {e}");
                            break;
                        }
                    }
                }
                _ = heartbeat.tick() => {
                    self.send(ClientMessage::Ping);
                }
            }
        }

        writer.abort();
    }

    /// Silently dropped (and logged) unless the link is open.
    pub fn send(&self, msg: ClientMessage) {
        if !may_transmit(self.state()) {
            debug!("[ws] dropped {msg:?} while {}", self.state().label());
            return;
        }
        if let Some(tx) = self.outbound.read().as_ref() {
            let _ = tx.send(msg);
        }
    }

    /// Cancel the supervisor (and with it the heartbeat and any pending
    /// reconnect) and return to Disconnected.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.supervisor.write().take() {
            task.cancel();
        }
        self.outbound.set(None);
        self.state.set(ConnectionState::Disconnected);
    }
}

/// Parse one inbound frame. Both update kinds carry a raw payload that is
/// reconciled into a snapshot; unknown types and malformed frames come
/// back as a protocol error the caller logs and drops without touching
/// connection state.
pub fn decode_frame(text: &str) -> Result<Snapshot, FeedError> {
    let msg = serde_json::from_str::<ServerMessage>(text)
        .map_err(|e| FeedError::Protocol(e.to_string()))?;
    match msg {
        ServerMessage::InitialState(data) | ServerMessage::EvolutionUpdate(data) => {
            Ok(normalize::snapshot_from_value(&data))
        }
    }
}
