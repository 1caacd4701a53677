//! Message relay handlers.
//!
//! Handles PRIVMSG (to a channel or a nick) and MSG (channel only).

mod privmsg;
mod routing;

pub use privmsg::{MsgHandler, PrivmsgHandler};
