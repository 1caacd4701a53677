//! Command handler registry and dispatch.
//!
//! The `Registry` maps command names to handlers and enforces the
//! registration gate before any handler runs.

use super::context::Context;
use super::request::Request;
use super::traits::Handler;
use crate::error::HandlerError;
use crate::handlers::{
    channel::{InviteHandler, JoinHandler, KickHandler, PartHandler, TopicHandler},
    connection::{
        CapHandler, NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
    },
    messaging::{MsgHandler, PrivmsgHandler},
    mode::ModeHandler,
};
use std::collections::HashMap;
use tracing::{Level, debug, span};

type HandlerMap = HashMap<&'static str, Box<dyn Handler>>;

/// Registry of command handlers.
pub struct Registry {
    /// Allowed only before registration completes.
    pre_reg: HandlerMap,
    /// Allowed only after registration completes.
    post_reg: HandlerMap,
    /// Allowed in every phase.
    universal: HandlerMap,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut pre_reg: HandlerMap = HashMap::new();
        pre_reg.insert("PASS", Box::new(PassHandler));
        pre_reg.insert("USER", Box::new(UserHandler));

        let mut universal: HandlerMap = HashMap::new();
        universal.insert("CAP", Box::new(CapHandler));
        universal.insert("NICK", Box::new(NickHandler));
        universal.insert("PING", Box::new(PingHandler));
        universal.insert("PONG", Box::new(PongHandler));
        universal.insert("QUIT", Box::new(QuitHandler));

        let mut post_reg: HandlerMap = HashMap::new();
        post_reg.insert("JOIN", Box::new(JoinHandler));
        post_reg.insert("PART", Box::new(PartHandler));
        post_reg.insert("KICK", Box::new(KickHandler));
        post_reg.insert("TOPIC", Box::new(TopicHandler));
        post_reg.insert("INVITE", Box::new(InviteHandler));
        post_reg.insert("MODE", Box::new(ModeHandler));
        post_reg.insert("PRIVMSG", Box::new(PrivmsgHandler));
        post_reg.insert("MSG", Box::new(MsgHandler));

        Self {
            pre_reg,
            post_reg,
            universal,
        }
    }

    /// Pick the handler for `command` given the sender's phase.
    fn lookup(&self, command: &str, registered: bool) -> Result<&dyn Handler, HandlerError> {
        if let Some(handler) = self.universal.get(command) {
            return Ok(handler.as_ref());
        }
        if registered {
            if let Some(handler) = self.post_reg.get(command) {
                Ok(handler.as_ref())
            } else if self.pre_reg.contains_key(command) {
                Err(HandlerError::AlreadyRegistered)
            } else {
                Err(HandlerError::UnknownCommand(command.to_string()))
            }
        } else {
            self.pre_reg
                .get(command)
                .map(|h| h.as_ref())
                .ok_or(HandlerError::NotRegistered)
        }
    }

    /// Interpret one inbound line for `ctx.id`.
    ///
    /// Handler errors are turned into numeric replies to the sender; the
    /// line is never propagated further.
    pub fn dispatch(&self, ctx: &mut Context<'_>, line: &str) {
        let Some(request) = Request::parse(line) else {
            return;
        };
        let Ok(session) = ctx.session() else {
            debug!(id = %ctx.id, "Line for a departed session dropped");
            return;
        };
        let registered = session.is_registered();

        let span = span!(
            Level::DEBUG,
            "irc.command",
            command = request.command,
            id = %ctx.id,
            nick = %ctx.nick(),
        );
        let _enter = span.enter();

        let result = self
            .lookup(request.command, registered)
            .and_then(|handler| handler.handle(ctx, request.args));

        if let Err(err) = result {
            debug!(error = %err, code = err.error_code(), "Command failed");
            let nick = ctx.nick();
            if let Some(reply) = err.to_irc_reply(ctx.server_name(), &nick, request.command) {
                ctx.send(reply);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::Harness;

    #[test]
    fn unregistered_session_is_gated() {
        let mut h = Harness::new();
        let id = h.connect();
        h.line(id, "PASS secret");
        h.line(id, "JOIN #a");
        assert_eq!(
            h.take(id),
            vec![":test.server 451 * :You have not registered".to_string()]
        );
    }

    #[test]
    fn unknown_command_after_registration() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        h.line(alice, "FOO bar");
        assert_eq!(
            h.take(alice),
            vec![":test.server 421 alice FOO :Unknown command".to_string()]
        );
    }

    #[test]
    fn commands_are_case_sensitive() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        h.line(alice, "join #a");
        assert_eq!(
            h.take(alice),
            vec![":test.server 421 alice join :Unknown command".to_string()]
        );
    }

    #[test]
    fn pre_registration_commands_rejected_once_registered() {
        let mut h = Harness::new();
        let alice = h.register("alice");
        h.line(alice, "USER a b c :d");
        h.line(alice, "PASS secret");
        assert_eq!(
            h.take(alice),
            vec![
                ":test.server 462 alice :You may not reregister".to_string(),
                ":test.server 462 alice :You may not reregister".to_string(),
            ]
        );
    }

    #[test]
    fn empty_lines_produce_nothing() {
        let mut h = Harness::new();
        let id = h.connect();
        h.line(id, "");
        h.line(id, "   ");
        assert!(h.take(id).is_empty());
    }

    #[test]
    fn universal_commands_work_before_password() {
        let mut h = Harness::new();
        let id = h.connect();
        h.line(id, "PING abc");
        assert_eq!(
            h.take(id),
            vec![":test.server PONG test.server :abc".to_string()]
        );
    }
}
