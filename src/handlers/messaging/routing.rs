//! Delivery of relayed text.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::Context;
use ircserv_proto::{Command, Message, Response};
use tracing::debug;

/// Relay `body` to every member of `channel` except the sender.
///
/// The sender must be a member.
pub(super) fn route_to_channel(ctx: &mut Context<'_>, channel: &str, body: &str) -> HandlerResult {
    if !ctx.channel(channel)?.is_member(ctx.id) {
        return Err(HandlerError::channel(channel, ChannelError::NotOnChannel));
    }

    let msg = Message::from(Command::PRIVMSG(channel.to_string(), body.to_string()))
        .with_prefix(ctx.prefix()?);
    ctx.matrix.broadcast(channel, &msg, Some(ctx.id));
    debug!(id = %ctx.id, channel, "Channel message relayed");
    Ok(())
}

/// Deliver `body` to the session holding `nick` and acknowledge with 341.
pub(super) fn route_to_user(ctx: &mut Context<'_>, nick: &str, body: &str) -> HandlerResult {
    let target = ctx
        .matrix
        .nicks
        .resolve(nick)
        .ok_or_else(|| HandlerError::NoSuchNick(nick.to_string()))?;

    let msg = Message::from(Command::PRIVMSG(nick.to_string(), body.to_string()))
        .with_prefix(ctx.prefix()?);
    ctx.matrix.send(target, msg);
    ctx.send_reply(
        Response::RPL_INVITING,
        vec![nick.to_string(), body.to_string()],
    );
    debug!(id = %ctx.id, target = nick, "Private message delivered");
    Ok(())
}
