//! PING and PONG handlers.

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, strip_colon};
use ircserv_proto::{Command, Message};

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let token = strip_colon(args);
        if token.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let server = ctx.server_name().to_string();
        let pong = Command::PONG(server, Some(token.to_string()));
        let pong = ctx.server_message(Message::from(pong));
        ctx.send(pong);
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, _ctx: &mut Context<'_>, _args: &str) -> HandlerResult {
        // Liveness is not tracked; nothing to do.
        Ok(())
    }
}
