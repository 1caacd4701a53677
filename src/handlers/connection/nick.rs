//! NICK handler.
//!
//! Before registration NICK records the nickname and may complete the
//! handshake. Afterwards it renames the session and tells the session and
//! each peer sharing a channel, once.

use super::welcome::send_welcome;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first, strip_colon};
use crate::state::is_valid_nick;
use ircserv_proto::{Command, Message};
use tracing::info;

/// Handler for NICK command.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let session = ctx.session()?;
        if !session.password_verified() {
            return Err(HandlerError::PasswordRequired);
        }

        let nick = strip_colon(split_first(args).0);
        if nick.is_empty() {
            return Err(HandlerError::NoNicknameGiven);
        }
        if !is_valid_nick(nick, ctx.limits().nick_len) {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        let old_nick = session.nick.clone();
        if old_nick.as_deref() == Some(nick) {
            return Ok(());
        }
        let registered = session.is_registered();
        let old_prefix = session.prefix();

        ctx.matrix
            .nicks
            .claim(nick, ctx.id, old_nick.as_deref())
            .map_err(|_| HandlerError::NicknameInUse(nick.to_string()))?;
        ctx.session_mut()?.nick = Some(nick.to_string());

        if registered {
            let change = Message::from(Command::NICK(nick.to_string())).with_prefix(old_prefix);
            ctx.matrix.send_to_peers(ctx.id, &change);
            ctx.send(change);
            info!(
                id = %ctx.id,
                old = old_nick.as_deref().unwrap_or("*"),
                new = nick,
                "Nick changed"
            );
        } else if ctx.session_mut()?.try_register() {
            send_welcome(ctx)?;
        }
        Ok(())
    }
}
