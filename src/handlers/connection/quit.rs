//! QUIT handler for terminating client sessions.

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler, strip_colon};
use ircserv_proto::{Command, Message};
use tracing::info;

/// Reason used when QUIT carries none.
const DEFAULT_REASON: &str = "Client quit";

/// Handler for QUIT command.
///
/// Sends a final `ERROR` line and destroys the session. Dropping the
/// session closes its outbound queue, which makes the connection task
/// flush and shut the socket.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let reason = match strip_colon(args) {
            "" => DEFAULT_REASON,
            reason => reason,
        };

        info!(id = %ctx.id, nick = %ctx.nick(), %reason, "Client quit");

        ctx.send(Message::from(Command::ERROR(format!(
            "Closing link ({})",
            reason
        ))));
        ctx.matrix.disconnect(ctx.id, reason);
        Ok(())
    }
}
