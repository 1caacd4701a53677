//! Command handler context.

use crate::config::LimitsConfig;
use crate::error::HandlerError;
use crate::state::{Channel, Matrix, Session, SessionId};
use ircserv_proto::{Message, Prefix, Response};

/// Handler context passed to each command handler.
///
/// Borrows the Matrix mutably for the duration of one command, which is
/// what makes each command atomic with respect to every other connection.
pub struct Context<'a> {
    /// The session that sent the line.
    pub id: SessionId,
    /// Server state.
    pub matrix: &'a mut Matrix,
}

impl<'a> Context<'a> {
    pub fn new(id: SessionId, matrix: &'a mut Matrix) -> Self {
        Self { id, matrix }
    }

    pub fn server_name(&self) -> &str {
        &self.matrix.server_info.name
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.matrix.limits
    }

    /// The sender's nick, or `*` before one is set.
    pub fn nick(&self) -> String {
        self.matrix.nick_of(self.id)
    }

    pub fn session(&self) -> Result<&Session, HandlerError> {
        self.matrix
            .sessions
            .get(self.id)
            .ok_or_else(|| HandlerError::Internal(format!("session {} vanished", self.id)))
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, HandlerError> {
        let id = self.id;
        self.matrix
            .sessions
            .get_mut(id)
            .ok_or_else(|| HandlerError::Internal(format!("session {} vanished", id)))
    }

    /// `nick!user@host` of the sender.
    pub fn prefix(&self) -> Result<Prefix, HandlerError> {
        Ok(self.session()?.prefix())
    }

    /// Look up a channel, failing with 403.
    pub fn channel(&self, name: &str) -> Result<&Channel, HandlerError> {
        self.matrix
            .channels
            .get(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))
    }

    /// Mutable [`Context::channel`].
    pub fn channel_mut(&mut self, name: &str) -> Result<&mut Channel, HandlerError> {
        self.matrix
            .channels
            .get_mut(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))
    }

    /// Queue a message for the sender.
    pub fn send(&mut self, msg: Message) {
        self.matrix.send(self.id, msg);
    }

    /// Build and send a numeric reply; the sender's nick is prepended.
    pub fn send_reply(&mut self, response: Response, params: Vec<String>) {
        self.matrix.send_numeric(self.id, response, params);
    }

    /// A message sourced from this server.
    pub fn server_message(&self, msg: Message) -> Message {
        msg.with_prefix(Prefix::ServerName(self.server_name().to_string()))
    }
}
