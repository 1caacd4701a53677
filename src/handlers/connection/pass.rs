//! PASS handler.

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler, strip_colon};
use crate::state::RegistrationPhase;
use tracing::{debug, warn};

/// Handler for PASS command.
///
/// The whole argument text (one leading `:` dropped) is the password.
pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult {
        let password = strip_colon(args);
        if password.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }
        if ctx.session()?.password_verified() {
            return Err(HandlerError::AlreadyRegistered);
        }

        if password != ctx.matrix.server_info.password {
            warn!(id = %ctx.id, "Password mismatch");
            return Err(HandlerError::PasswordMismatch);
        }

        ctx.session_mut()?.phase = RegistrationPhase::AwaitingIdentity;
        debug!(id = %ctx.id, "Password accepted");
        Ok(())
    }
}
