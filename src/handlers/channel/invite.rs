//! INVITE command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first};
use ircserv_proto::{Command, Message, Response};
use tracing::info;

/// Handler for INVITE command.
///
/// `INVITE <#channel> <nick>`. Operators only. The invitation lets the
/// target past the invite-only check once; it is consumed by the JOIN.
pub struct InviteHandler;

impl Handler for InviteHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (name, rest) = split_first(args);
        let (target, _) = split_first(rest);
        if name.is_empty() || target.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let channel = ctx.channel(name)?;
        if !channel.is_operator(ctx.id) {
            return Err(HandlerError::channel(name, ChannelError::ChanOpPrivsNeeded));
        }
        let target_id = ctx
            .matrix
            .nicks
            .resolve(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
        if channel.is_member(target_id) {
            return Err(HandlerError::channel(
                name,
                ChannelError::UserOnChannel(target.to_string()),
            ));
        }

        ctx.channel_mut(name)?.invite(target_id);
        let invite = Message::from(Command::INVITE(target.to_string(), name.to_string()))
            .with_prefix(ctx.prefix()?);
        ctx.matrix.send(target_id, invite);
        ctx.send_reply(
            Response::RPL_INVITING,
            vec![target.to_string(), name.to_string(), "Invitation sent".to_string()],
        );

        info!(id = %ctx.id, inviter = %ctx.nick(), target, channel = name, "User invited");
        Ok(())
    }
}
