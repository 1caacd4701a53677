//! In-memory harness for handler tests.
//!
//! Drives a [`Matrix`] through the [`Registry`] exactly as the event loop
//! does and reads each session's outbound queue without any sockets.

use super::{Context, Registry};
use crate::config::Config;
use crate::state::{Matrix, SessionId};
use ircserv_proto::Message;
use std::collections::HashMap;
use tokio::sync::mpsc;

pub(crate) const PASSWORD: &str = "secret";

pub(crate) struct Harness {
    pub matrix: Matrix,
    registry: Registry,
    queues: HashMap<SessionId, mpsc::Receiver<Message>>,
}

impl Harness {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.name = "test.server".into();
        config.server.network = "TestNet".into();
        config.server.password = PASSWORD.into();
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            matrix: Matrix::new(config),
            registry: Registry::new(),
            queues: HashMap::new(),
        }
    }

    pub fn connect(&mut self) -> SessionId {
        let (tx, rx) = mpsc::channel(self.matrix.limits.sendq);
        let id = self.matrix.connect("127.0.0.1".into(), tx);
        self.queues.insert(id, rx);
        id
    }

    pub fn line(&mut self, id: SessionId, line: &str) {
        let mut ctx = Context::new(id, &mut self.matrix);
        self.registry.dispatch(&mut ctx, line);
    }

    /// Everything queued for `id` so far, serialized.
    pub fn take(&mut self, id: SessionId) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(rx) = self.queues.get_mut(&id) {
            while let Ok(msg) = rx.try_recv() {
                lines.push(msg.to_string());
            }
        }
        lines
    }

    /// Connect and complete registration, discarding the welcome burst.
    pub fn register(&mut self, nick: &str) -> SessionId {
        let id = self.connect();
        self.line(id, &format!("PASS {}", PASSWORD));
        self.line(id, &format!("NICK {}", nick));
        self.line(id, &format!("USER {} 0 * :{} Real", nick, nick));
        self.take(id);
        id
    }

    /// Drain every session's queue.
    pub fn clear(&mut self) {
        for rx in self.queues.values_mut() {
            while rx.try_recv().is_ok() {}
        }
    }
}
