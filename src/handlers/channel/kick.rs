//! KICK command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first, strip_colon};
use ircserv_proto::{Command, Message};
use tracing::info;

/// Reason used when KICK carries none.
const DEFAULT_REASON: &str = "Kicked by operator";

/// Handler for KICK command.
///
/// `KICK <#channel> <nick> [reason]`. Operators only. Every member, the
/// target included, sees the KICK before the target is removed.
pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (name, rest) = split_first(args);
        let (target, reason) = split_first(rest);
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
            .filter(|t| channel.is_member(*t))
            .ok_or_else(|| {
                HandlerError::channel(name, ChannelError::UserNotInChannel(target.to_string()))
            })?;

        let reason = match strip_colon(reason) {
            "" => DEFAULT_REASON,
            reason => reason,
        };
        let kick = Message::from(Command::KICK(
            name.to_string(),
            target.to_string(),
            Some(reason.to_string()),
        ))
        .with_prefix(ctx.prefix()?);
        ctx.matrix.broadcast(name, &kick, None);
        ctx.matrix.remove_member(target_id, name);

        info!(
            id = %ctx.id,
            kicker = %ctx.nick(),
            target,
            channel = name,
            %reason,
            "User kicked"
        );
        Ok(())
    }
}
