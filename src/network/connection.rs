//! Connection - handles an individual client socket.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!   socket ──FramedRead<LineCodec>──▶ Event::Line ──▶ EventLoop
//!   socket ◀─FramedWrite<LineCodec>── outbound rx ◀── Matrix outbox
//! ```
//!
//! The task never touches server state. When the event loop destroys the
//! session it drops the outbound sender; the task then writes whatever is
//! still queued and closes the socket.

use super::event_loop::Event;
use crate::config::LimitsConfig;
use crate::state::SessionId;
use anyhow::{Context as _, anyhow};
use futures_util::{SinkExt, StreamExt};
use ircserv_proto::{LineCodec, Message};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, instrument, warn};

/// Reason reported when the peer closes the socket.
const PEER_CLOSED: &str = "Connection closed";

/// A registered client connection.
pub struct Connection {
    id: SessionId,
    addr: SocketAddr,
    stream: TcpStream,
    events: mpsc::Sender<Event>,
    outbound: mpsc::Receiver<Message>,
    line_len: usize,
}

impl Connection {
    /// Announce a freshly accepted socket to the event loop and wait for
    /// its session id.
    pub async fn register(
        stream: TcpStream,
        addr: SocketAddr,
        events: mpsc::Sender<Event>,
        limits: &LimitsConfig,
    ) -> anyhow::Result<Self> {
        let (outbound_tx, outbound) = mpsc::channel(limits.sendq);
        let (reply, id_rx) = oneshot::channel();
        events
            .send(Event::Connected {
                addr,
                outbound: outbound_tx,
                reply,
            })
            .await
            .map_err(|_| anyhow!("event loop stopped"))?;
        let id = id_rx.await.context("event loop dropped the registration")?;

        Ok(Self {
            id,
            addr,
            stream,
            events,
            outbound,
            line_len: limits.line_len,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Pump lines in both directions until either side closes.
    #[instrument(skip(self), fields(id = %self.id, addr = %self.addr), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            id,
            stream,
            events,
            mut outbound,
            line_len,
            ..
        } = self;
        let (read_half, write_half) = stream.into_split();
        let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(line_len));
        let mut writer = FramedWrite::new(write_half, LineCodec::new());

        let reason = loop {
            tokio::select! {
                frame = reader.next() => match frame {
                    Some(Ok(line)) => {
                        if events.send(Event::Line { id, line }).await.is_err() {
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Read error");
                        break e.to_string();
                    }
                    None => break PEER_CLOSED.to_string(),
                },
                queued = outbound.recv() => match queued {
                    Some(msg) => {
                        if let Err(e) = write_batch(&mut writer, &mut outbound, msg).await {
                            warn!(error = %e, "Write error");
                            break e.to_string();
                        }
                    }
                    None => {
                        // Session destroyed by the server; the queue is drained.
                        debug!("Outbound queue closed");
                        return Ok(());
                    }
                },
            }
        };

        // The event loop may already be gone during shutdown.
        let _ = events.send(Event::Closed { id, reason }).await;
        Ok(())
    }
}

/// Write `first` plus anything else already queued, then flush once.
async fn write_batch<W>(
    writer: &mut FramedWrite<W, LineCodec>,
    outbound: &mut mpsc::Receiver<Message>,
    first: Message,
) -> Result<(), ircserv_proto::ProtocolError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    writer.feed(first).await?;
    while let Ok(msg) = outbound.try_recv() {
        writer.feed(msg).await?;
    }
    writer.flush().await
}
