//! CAP handler.
//!
//! No capabilities are offered. `LS`/`LIST` answer with an empty list and
//! `END` is acknowledged so that clients which start with capability
//! negotiation proceed to registration.

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first};
use ircserv_proto::{Command, Message};
use tracing::debug;

/// Handler for CAP command.
pub struct CapHandler;

impl Handler for CapHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let (subcommand, _) = split_first(args);
        if subcommand.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let reply = match subcommand {
            "LS" | "LIST" => Command::CAP(ctx.nick(), subcommand.to_string(), Some(String::new())),
            "END" => Command::CAP("*".to_string(), "ACK".to_string(), None),
            _ => {
                debug!(subcommand, "CAP subcommand ignored");
                return Ok(());
            }
        };
        let reply = ctx.server_message(Message::from(reply));
        ctx.send(reply);
        Ok(())
    }
}
