//! MODE command handler.
//!
//! One mode letter per command: `MODE <#channel> <+/-letter> [param]`.
//! The token is decoded into a [`ModeChange`] and applied to the channel;
//! every member then sees the change with the operator as its source.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first};
use crate::state::{Channel, ModeChange, SessionId};
use ircserv_proto::{Command, Message};
use tracing::info;

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (name, rest) = split_first(args);
        let (token, param) = split_first(rest);
        if name.is_empty() || token.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        if !ctx.channel(name)?.is_operator(ctx.id) {
            return Err(HandlerError::channel(name, ChannelError::ChanOpPrivsNeeded));
        }
        let change = ModeChange::parse(token, param)?;

        // Resolve before borrowing the channel mutably.
        let target = match &change {
            ModeChange::Operator(nick) => Some(
                ctx.matrix
                    .nicks
                    .resolve(nick)
                    .ok_or_else(|| HandlerError::NoSuchNick(nick.clone()))?,
            ),
            _ => None,
        };

        let channel = ctx.channel_mut(name)?;
        let mode_args = apply(channel, change, target)?;

        let announce = Message::from(Command::MODE(name.to_string(), mode_args.clone()))
            .with_prefix(ctx.prefix()?);
        ctx.matrix.broadcast(name, &announce, None);

        info!(
            id = %ctx.id,
            nick = %ctx.nick(),
            channel = name,
            mode = %mode_args.join(" "),
            "Channel mode changed"
        );
        Ok(())
    }
}

fn flag(letter: char, on: bool) -> String {
    format!("{}{}", if on { '+' } else { '-' }, letter)
}

/// Apply `change` and return the MODE parameters announcing the result.
fn apply(
    channel: &mut Channel,
    change: ModeChange,
    target: Option<SessionId>,
) -> Result<Vec<String>, HandlerError> {
    let args = match change {
        ModeChange::InviteOnly => {
            channel.invite_only = !channel.invite_only;
            vec![flag('i', channel.invite_only)]
        }
        ModeChange::TopicRestricted => {
            channel.topic_restricted = !channel.topic_restricted;
            vec![flag('t', channel.topic_restricted)]
        }
        ModeChange::Key(Some(key)) => {
            channel.key = Some(key.clone());
            vec![flag('k', true), key]
        }
        ModeChange::Key(None) => {
            channel.key = None;
            vec![flag('k', false)]
        }
        ModeChange::Limit(0) => {
            channel.limit = 0;
            vec![flag('l', false)]
        }
        ModeChange::Limit(limit) => {
            channel.limit = limit;
            vec![flag('l', true), limit.to_string()]
        }
        ModeChange::Operator(nick) => {
            let toggled = target.and_then(|id| channel.toggle_operator(id));
            match toggled {
                Some(now_op) => vec![flag('o', now_op), nick],
                None => {
                    return Err(HandlerError::channel(
                        &channel.name,
                        ChannelError::UserNotInChannel(nick),
                    ));
                }
            }
        }
    };
    Ok(args)
}
