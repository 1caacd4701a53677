//! USER handler.

use super::welcome::send_welcome;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, split_first, strip_colon};
use crate::state::UserInfo;

/// Handler for USER command.
///
/// `USER <username> <hostname> <servername> <realname>`; the realname is
/// the rest of the line and may contain spaces.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let session = ctx.session()?;
        if !session.password_verified() {
            return Err(HandlerError::PasswordRequired);
        }
        if session.user.is_some() {
            return Err(HandlerError::AlreadyRegistered);
        }

        let (username, rest) = split_first(args);
        let (hostname, rest) = split_first(rest);
        let (servername, rest) = split_first(rest);
        let realname = strip_colon(rest);
        if username.is_empty() || realname.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let session = ctx.session_mut()?;
        session.user = Some(UserInfo {
            username: username.to_string(),
            hostname: hostname.to_string(),
            servername: servername.to_string(),
            realname: realname.to_string(),
        });
        if session.try_register() {
            send_welcome(ctx)?;
        }
        Ok(())
    }
}
