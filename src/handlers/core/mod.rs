//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the [`Handler`] trait, the per-command [`Context`], line
//! splitting ([`Request`]) and the [`Registry`] that dispatches lines.
//!
//! ## Registration scopes
//!
//! The registry keeps three handler tables:
//!
//! - pre-registration: PASS, USER
//! - post-registration: JOIN, PART, PRIVMSG, MSG, TOPIC, KICK, INVITE, MODE
//! - universal: CAP, NICK, PING, PONG, QUIT
//!
//! Which table is consulted depends on the session's registration phase,
//! so a post-registration handler can never run for an unregistered
//! connection.

pub mod context;
pub mod registry;
pub mod request;
pub mod traits;

pub use context::Context;
pub use registry::Registry;
pub use request::Request;
pub use traits::Handler;
