//! TOPIC command handler.

use super::common::send_topic;
use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first, strip_colon};
use ircserv_proto::{Command, Message};
use tracing::info;

/// Handler for TOPIC command.
///
/// `TOPIC <#channel>` reads the topic; `TOPIC <#channel> <text>` sets it.
/// When the channel is topic-restricted only operators may set it.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (name, text) = split_first(args);
        let text = strip_colon(text);
        if name.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let channel = ctx.channel(name)?;
        if text.is_empty() {
            send_topic(ctx.matrix, ctx.id, name);
            return Ok(());
        }
        if channel.topic_restricted && !channel.is_operator(ctx.id) {
            return Err(HandlerError::channel(name, ChannelError::TopicPrivsNeeded));
        }

        ctx.channel_mut(name)?.topic = text.to_string();
        let topic = Message::from(Command::TOPIC(name.to_string(), Some(text.to_string())))
            .with_prefix(ctx.prefix()?);
        ctx.matrix.broadcast(name, &topic, None);

        info!(id = %ctx.id, nick = %ctx.nick(), channel = name, "Topic changed");
        Ok(())
    }
}
