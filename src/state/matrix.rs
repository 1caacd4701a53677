//! The Matrix - central server state.
//!
//! The Matrix owns every registry. Exactly one task (the event loop) owns
//! the Matrix, so every mutation runs to completion before the next line is
//! processed and no locking is needed.
//!
//! Membership is recorded twice: in the channel's member set and in the
//! session's channel list. Only the methods here touch both, which keeps
//! the two sides consistent across join, part, kick and disconnect.

use super::channel::ChannelRegistry;
use super::nicks::NickIndex;
use super::outbox::Outbox;
use super::registry::ConnectionRegistry;
use super::session::Session;
use super::uid::SessionId;
use crate::config::{Config, LimitsConfig};
use chrono::{DateTime, Utc};
use ircserv_proto::{Command, Message, Response};
use std::collections::BTreeSet;
use tokio::sync::mpsc;
use tracing::info;

/// This server's identity.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// Server name used as the prefix of numeric replies.
    pub name: String,
    /// Network name used in the welcome line.
    pub network: String,
    /// Shared connection password.
    pub password: String,
    /// Server start time, reported by 003.
    pub created: DateTime<Utc>,
}

/// The Matrix - central state container.
pub struct Matrix {
    pub server_info: ServerInfo,
    pub limits: LimitsConfig,
    pub sessions: ConnectionRegistry,
    pub nicks: NickIndex,
    pub channels: ChannelRegistry,
    pub outbox: Outbox,
}

impl Matrix {
    pub fn new(config: &Config) -> Self {
        Self {
            server_info: ServerInfo {
                name: config.server.name.clone(),
                network: config.server.network.clone(),
                password: config.server.password.clone(),
                created: Utc::now(),
            },
            limits: config.limits.clone(),
            sessions: ConnectionRegistry::new(),
            nicks: NickIndex::new(),
            channels: ChannelRegistry::new(),
            outbox: Outbox::new(),
        }
    }

    /// Create a session for a freshly accepted connection.
    pub fn connect(&mut self, host: String, sender: mpsc::Sender<Message>) -> SessionId {
        let id = self.sessions.insert(Session::new(host));
        self.outbox.register(id, sender);
        id
    }

    /// Nick of `id`, or `*` when unset or unknown.
    pub fn nick_of(&self, id: SessionId) -> String {
        self.sessions
            .get(id)
            .map(|s| s.nick_or_star().to_string())
            .unwrap_or_else(|| "*".to_string())
    }

    /// Queue a message for one session.
    pub fn send(&mut self, id: SessionId, msg: Message) -> bool {
        self.outbox.send(id, msg)
    }

    /// Queue a numeric reply; the recipient's nick is prepended to `args`.
    pub fn send_numeric(&mut self, id: SessionId, response: Response, mut args: Vec<String>) {
        args.insert(0, self.nick_of(id));
        let msg = Message::numeric(&self.server_info.name, response, args);
        self.outbox.send(id, msg);
    }

    /// Queue `msg` for every member of `channel` except `except`.
    pub fn broadcast(&mut self, channel: &str, msg: &Message, except: Option<SessionId>) {
        let Some(chan) = self.channels.get(channel) else {
            return;
        };
        for member in chan.members() {
            if Some(member) != except {
                self.outbox.send(member, msg.clone());
            }
        }
    }

    /// Sessions sharing at least one channel with `id`, excluding `id`.
    pub fn peers(&self, id: SessionId) -> BTreeSet<SessionId> {
        let Some(session) = self.sessions.get(id) else {
            return BTreeSet::new();
        };
        session
            .channels
            .iter()
            .filter_map(|name| self.channels.get(name))
            .flat_map(|chan| chan.members())
            .filter(|member| *member != id)
            .collect()
    }

    /// Queue `msg` once for each peer of `id`.
    pub fn send_to_peers(&mut self, id: SessionId, msg: &Message) {
        for peer in self.peers(id) {
            self.outbox.send(peer, msg.clone());
        }
    }

    /// Add `id` to `channel`, creating the channel if needed.
    ///
    /// Returns whether the channel was created (making `id` its operator).
    pub fn add_member(&mut self, id: SessionId, channel: &str) -> bool {
        let created = match self.channels.get_mut(channel) {
            Some(chan) => {
                chan.add_member(id);
                false
            }
            None => {
                self.channels.create(channel, id);
                info!(%channel, founder = %id, "Channel created");
                true
            }
        };
        if let Some(session) = self.sessions.get_mut(id) {
            session.channels.insert(channel.to_string());
        }
        created
    }

    /// Remove `id` from `channel` on both sides, deleting the channel once
    /// empty. Returns whether `id` was a member.
    pub fn remove_member(&mut self, id: SessionId, channel: &str) -> bool {
        if let Some(session) = self.sessions.get_mut(id) {
            session.channels.remove(channel);
        }
        let removed = self
            .channels
            .get_mut(channel)
            .is_some_and(|chan| chan.remove(id));
        if self.channels.remove_if_empty(channel) {
            info!(%channel, "Channel deleted");
        }
        removed
    }

    /// Roster entries of `channel`, operators prefixed with `@`.
    pub fn names(&self, channel: &str) -> Option<Vec<String>> {
        let chan = self.channels.get(channel)?;
        let names: Vec<String> = chan
            .members()
            .filter_map(|member| {
                let nick = self.sessions.get(member)?.nick.as_deref()?;
                Some(if chan.is_operator(member) {
                    format!("@{}", nick)
                } else {
                    nick.to_string()
                })
            })
            .collect();
        Some(names)
    }

    /// Destroy a session.
    ///
    /// Peers sharing a channel receive one `QUIT` each, then the session is
    /// purged from every channel set and from the nickname index, and its
    /// outbound queue is closed. Unknown or stale ids are ignored.
    pub fn disconnect(&mut self, id: SessionId, reason: &str) {
        let Some(session) = self.sessions.get(id) else {
            return;
        };
        let quit = Message::from(Command::QUIT(Some(reason.to_string()))).with_prefix(session.prefix());
        let joined: Vec<String> = session.channels.iter().cloned().collect();
        let registered = session.is_registered();

        if registered {
            self.send_to_peers(id, &quit);
        }
        for channel in &joined {
            self.remove_member(id, channel);
        }
        self.channels.revoke_invites(id);

        if let Some(session) = self.sessions.remove(id) {
            if let Some(nick) = &session.nick {
                self.nicks.release(nick, id);
            }
            info!(%id, nick = session.nick_or_star(), %reason, "Client disconnected");
        }
        self.outbox.unregister(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RegistrationPhase;

    fn matrix() -> Matrix {
        Matrix::new(&Config::default())
    }

    fn registered(m: &mut Matrix, nick: &str) -> (SessionId, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(64);
        let id = m.connect("127.0.0.1".into(), tx);
        m.nicks.claim(nick, id, None).unwrap();
        let s = m.sessions.get_mut(id).unwrap();
        s.nick = Some(nick.into());
        s.phase = RegistrationPhase::Registered;
        (id, rx)
    }

    fn drain(rx: &mut mpsc::Receiver<Message>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            lines.push(msg.to_string());
        }
        lines
    }

    #[test]
    fn membership_is_recorded_on_both_sides() {
        let mut m = matrix();
        let (a, _ra) = registered(&mut m, "alice");
        let (b, _rb) = registered(&mut m, "bob");

        assert!(m.add_member(a, "#room"));
        assert!(!m.add_member(b, "#room"));

        let chan = m.channels.get("#room").unwrap();
        assert!(chan.is_member(a) && chan.is_member(b));
        assert!(chan.is_operator(a) && !chan.is_operator(b));
        assert!(m.sessions.get(b).unwrap().channels.contains("#room"));
        assert_eq!(m.names("#room"), Some(vec!["@alice".to_string(), "bob".to_string()]));
    }

    #[test]
    fn last_member_leaving_deletes_channel() {
        let mut m = matrix();
        let (a, _ra) = registered(&mut m, "alice");
        m.add_member(a, "#room");
        m.channels.get_mut("#room").unwrap().topic = "old".into();

        assert!(m.remove_member(a, "#room"));
        assert!(!m.channels.contains("#room"));
        assert!(!m.remove_member(a, "#room"));

        m.add_member(a, "#room");
        assert!(m.channels.get("#room").unwrap().topic.is_empty());
    }

    #[test]
    fn disconnect_purges_everything_and_notifies_peers_once() {
        let mut m = matrix();
        let (a, _ra) = registered(&mut m, "alice");
        let (b, mut rb) = registered(&mut m, "bob");
        m.add_member(a, "#one");
        m.add_member(a, "#two");
        m.add_member(b, "#one");
        m.add_member(b, "#two");
        m.channels.create("#three", b).invite(a);

        m.disconnect(a, "gone");

        assert!(m.sessions.get(a).is_none());
        assert_eq!(m.nicks.resolve("alice"), None);
        assert!(!m.channels.get("#one").unwrap().is_member(a));
        assert!(!m.channels.get("#two").unwrap().is_member(a));
        assert!(!m.channels.get("#three").unwrap().is_invited(a));

        let lines = drain(&mut rb);
        assert_eq!(lines, vec![":alice!alice@127.0.0.1 QUIT :gone".to_string()]);
    }

    #[test]
    fn stale_disconnect_is_ignored() {
        let mut m = matrix();
        let (a, _ra) = registered(&mut m, "alice");
        m.disconnect(a, "bye");
        let (c, _rc) = registered(&mut m, "carol");
        assert_eq!(c.index(), a.index());

        m.disconnect(a, "bye again");
        assert!(m.sessions.get(c).is_some());
        assert_eq!(m.nicks.resolve("carol"), Some(c));
    }

    #[test]
    fn send_numeric_prepends_nick() {
        let mut m = matrix();
        let (tx, mut rx) = mpsc::channel(4);
        let id = m.connect("127.0.0.1".into(), tx);
        m.send_numeric(id, Response::ERR_PASSWDMISMATCH, vec!["Password incorrect".into()]);
        assert_eq!(drain(&mut rx), vec![":localhost 464 * :Password incorrect".to_string()]);
    }
}
