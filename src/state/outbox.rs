//! Delivery engine: per-session bounded outbound queues.
//!
//! The event loop never awaits a write. Each session's connection task owns
//! the receiving end of its queue; the loop enqueues with `try_send`. A full
//! queue marks the session for a "SendQ exceeded" disconnect, which the event
//! loop performs once the current event has finished.

use super::uid::SessionId;
use ircserv_proto::Message;
use std::collections::HashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct Outbox {
    senders: HashMap<SessionId, mpsc::Sender<Message>>,
    overflowed: Vec<SessionId>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: SessionId, sender: mpsc::Sender<Message>) {
        self.senders.insert(id, sender);
    }

    /// Drop the session's sender. Its connection task writes whatever is
    /// still queued and then closes the socket.
    pub fn unregister(&mut self, id: SessionId) {
        self.senders.remove(&id);
    }

    /// Queue `msg` for `id`. Returns whether it was queued.
    pub fn send(&mut self, id: SessionId, msg: Message) -> bool {
        let Some(sender) = self.senders.get(&id) else {
            return false;
        };
        match sender.try_send(msg) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                if !self.overflowed.contains(&id) {
                    warn!(%id, "SendQ exceeded");
                    self.overflowed.push(id);
                }
                false
            }
            Err(TrySendError::Closed(_)) => {
                // The connection task is gone; its Closed event cleans up.
                debug!(%id, "Dropping message for closed connection");
                false
            }
        }
    }

    /// Sessions whose queue overflowed since the last call.
    pub fn take_overflowed(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.overflowed)
    }
}
