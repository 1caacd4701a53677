//! Command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! inbound lines to the appropriate handler.
//!
//! Handlers receive the command's argument text verbatim and split it
//! themselves with [`helpers::split_first`]; free-text parameters drop a
//! single leading `:` via [`helpers::strip_colon`].

mod channel;
mod connection;
pub mod core;
mod helpers;
mod messaging;
mod mode;

pub use self::core::{Context, Handler, Registry, Request};
pub use channel::{InviteHandler, JoinHandler, KickHandler, PartHandler, TopicHandler};
pub use connection::{
    CapHandler, NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
};
pub use helpers::{split_first, strip_colon};
pub use messaging::{MsgHandler, PrivmsgHandler};
pub use mode::ModeHandler;

#[cfg(test)]
pub(crate) mod test_support;
