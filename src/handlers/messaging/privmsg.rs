//! PRIVMSG and MSG command handlers.

use super::routing::{route_to_channel, route_to_user};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first, strip_colon};

/// Handler for PRIVMSG command.
///
/// `PRIVMSG <target> <text>`. A target starting with `#` is a channel;
/// anything else is a nickname.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (target, body) = split_first(args);
        let body = strip_colon(body);
        if target.is_empty() || body.is_empty() {
            return Err(HandlerError::NoRecipient);
        }

        if target.starts_with('#') {
            route_to_channel(ctx, target, body)
        } else {
            route_to_user(ctx, target, body)
        }
    }
}

/// Handler for MSG command.
///
/// `MSG <#channel> <text>`: channel-only shorthand, relayed as PRIVMSG.
pub struct MsgHandler;

impl Handler for MsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (channel, body) = split_first(args);
        let body = strip_colon(body);
        if channel.is_empty() || body.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }
        route_to_channel(ctx, channel, body)
    }
}
