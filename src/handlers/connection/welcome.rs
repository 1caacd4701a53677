//! Registration completion burst.

use crate::error::HandlerResult;
use crate::handlers::Context;
use ircserv_proto::Response;
use tracing::info;

/// Send 001-003 to a session that just completed registration.
pub(super) fn send_welcome(ctx: &mut Context<'_>) -> HandlerResult {
    let nick = ctx.nick();
    let info = ctx.matrix.server_info.clone();

    ctx.send_reply(
        Response::RPL_WELCOME,
        vec![format!("Welcome to the {}, {}", info.network, nick)],
    );
    ctx.send_reply(
        Response::RPL_YOURHOST,
        vec![format!("Your host is {}", info.name)],
    );
    ctx.send_reply(
        Response::RPL_CREATED,
        vec![format!(
            "This server was created {}",
            info.created.format("%Y-%m-%d %H:%M:%S UTC")
        )],
    );

    let session = ctx.session()?;
    info!(id = %ctx.id, %nick, host = %session.host, "Client registered");
    Ok(())
}
