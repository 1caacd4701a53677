//! PART command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first, strip_colon};
use ircserv_proto::{Command, Message};
use tracing::info;

/// Handler for PART command.
///
/// `PART <#channel> [reason]`. The leaver sees its own PART.
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (name, reason) = split_first(args);
        let reason = strip_colon(reason);
        if name.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }
        if !ctx.channel(name)?.is_member(ctx.id) {
            return Err(HandlerError::channel(name, ChannelError::NotOnChannel));
        }

        let reason = (!reason.is_empty()).then(|| reason.to_string());
        let part = Message::from(Command::PART(name.to_string(), reason)).with_prefix(ctx.prefix()?);
        ctx.matrix.broadcast(name, &part, None);
        ctx.matrix.remove_member(ctx.id, name);

        info!(id = %ctx.id, nick = %ctx.nick(), channel = name, "Left channel");
        Ok(())
    }
}
