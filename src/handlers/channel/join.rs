//! JOIN command handler.

use super::common::{broadcast_names, send_topic};
use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first};
use crate::state::is_valid_channel_name;
use ircserv_proto::{Command, Message};
use tracing::info;

/// Handler for JOIN command.
///
/// `JOIN <#channel> [key]`. A missing channel is created with the joiner
/// as its operator. On success every member, the joiner included, sees the
/// JOIN and receives a fresh roster; the joiner also gets the topic.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (name, key) = split_first(args);
        if name.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }
        if !is_valid_channel_name(name, ctx.limits().channel_len) {
            return Err(HandlerError::NoSuchChannel(name.to_string()));
        }
        if ctx.session()?.channels.contains(name) {
            return Err(HandlerError::channel(name, ChannelError::AlreadyOnChannel));
        }

        let key = (!key.is_empty()).then_some(key);
        if let Some(channel) = ctx.matrix.channels.get(name) {
            channel
                .check_admission(ctx.id, key)
                .map_err(|e| HandlerError::channel(name, e))?;
        }

        let created = ctx.matrix.add_member(ctx.id, name);
        let join = Message::from(Command::JOIN(name.to_string(), None)).with_prefix(ctx.prefix()?);
        ctx.matrix.broadcast(name, &join, None);
        send_topic(ctx.matrix, ctx.id, name);
        broadcast_names(ctx.matrix, name);

        info!(id = %ctx.id, nick = %ctx.nick(), channel = name, created, "Joined channel");
        Ok(())
    }
}
