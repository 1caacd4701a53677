//! The single owner of server state.
//!
//! Connection tasks talk to the event loop exclusively through [`Event`]s.
//! Each event is handled to completion before the next is received, so
//! handlers see a consistent [`Matrix`] without any locking.

use crate::config::Config;
use crate::handlers::{Context, Registry};
use crate::state::{Matrix, SessionId};
use ircserv_proto::Message;
use std::net::SocketAddr;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Capacity of the inbound event queue shared by all connections.
pub const EVENT_QUEUE: usize = 1024;

/// Reason given to peers when a sendq overflows.
const SENDQ_EXCEEDED: &str = "SendQ exceeded";

/// Reason given to peers when a reply channel is gone before registration.
const CONNECTION_CLOSED: &str = "Connection closed";

/// Messages from connection tasks to the event loop.
#[derive(Debug)]
pub enum Event {
    /// A socket was accepted. The loop creates a session and answers with
    /// its id on `reply`.
    Connected {
        addr: SocketAddr,
        outbound: mpsc::Sender<Message>,
        reply: oneshot::Sender<SessionId>,
    },
    /// One framed inbound line.
    Line { id: SessionId, line: String },
    /// The socket hit EOF or an error.
    Closed { id: SessionId, reason: String },
}

/// Event loop: owns the Matrix and the command Registry.
pub struct EventLoop {
    matrix: Matrix,
    registry: Registry,
    events: mpsc::Receiver<Event>,
}

impl EventLoop {
    /// Create the loop and the sender connection tasks use to reach it.
    pub fn new(config: &Config) -> (Self, mpsc::Sender<Event>) {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE);
        let event_loop = Self {
            matrix: Matrix::new(config),
            registry: Registry::new(),
            events: rx,
        };
        (event_loop, tx)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Process events until every sender is gone.
    pub async fn run(mut self) {
        info!(server = %self.matrix.server_info.name, "Event loop started");
        while let Some(event) = self.events.recv().await {
            self.handle(event);
        }
        info!("Event loop stopped");
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Connected {
                addr,
                outbound,
                reply,
            } => {
                let id = self.matrix.connect(addr.ip().to_string(), outbound);
                if reply.send(id).is_err() {
                    self.matrix.disconnect(id, CONNECTION_CLOSED);
                } else {
                    debug!(%id, %addr, "Session created");
                }
            }
            Event::Line { id, line } => {
                if !self.matrix.sessions.contains(id) {
                    debug!(%id, "Line for a destroyed session dropped");
                    return;
                }
                let mut ctx = Context::new(id, &mut self.matrix);
                self.registry.dispatch(&mut ctx, &line);
            }
            Event::Closed { id, reason } => {
                self.matrix.disconnect(id, &reason);
            }
        }
        self.reap_overflowed();
    }

    /// Disconnect every session whose sendq filled up.
    ///
    /// Disconnecting sends QUIT to peers, which may overflow further queues,
    /// so this repeats until no overflow is left.
    fn reap_overflowed(&mut self) {
        loop {
            let overflowed = self.matrix.outbox.take_overflowed();
            if overflowed.is_empty() {
                return;
            }
            for id in overflowed {
                info!(%id, nick = %self.matrix.nick_of(id), "Disconnecting slow client");
                self.matrix.disconnect(id, SENDQ_EXCEEDED);
            }
        }
    }
}
