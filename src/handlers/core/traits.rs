//! The handler trait.

use super::context::Context;
use crate::error::HandlerResult;

/// A command handler.
///
/// `args` is everything after the command name, verbatim. Handlers run on
/// the event loop and must not block; all output goes through the
/// session outboxes in the [`crate::state::Matrix`].
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, args: &str) -> HandlerResult;
}
