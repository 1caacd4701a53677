//! # ircserv-proto
//!
//! Wire-level types for the ircserv chat protocol.
//!
//! - [`Prefix`]: origin of a message (server name or `nick!user@host`)
//! - [`Response`]: the numeric reply codes the server emits
//! - [`Command`]: commands with their parameters
//! - [`Message`]: prefix + command, serialized to the canonical line form
//! - [`LineCodec`]: tokio-util codec for newline-delimited lines
//!
//! Nothing in this crate knows about sessions or channels; the server
//! crate builds on these types.
//!
//! ## Quick Start
//!
//! ```rust
//! use ircserv_proto::{Command, Message, Prefix, Response};
//!
//! let msg = Message::from(Command::PRIVMSG("#rust".into(), "hello there".into()))
//!     .with_prefix(Prefix::new("alice", "alice", "127.0.0.1"));
//! assert_eq!(msg.to_string(), ":alice!alice@127.0.0.1 PRIVMSG #rust :hello there");
//!
//! let reply = Message::numeric(
//!     "localhost",
//!     Response::ERR_NOSUCHCHANNEL,
//!     vec!["alice".into(), "#nope".into(), "No such channel".into()],
//! );
//! assert_eq!(reply.to_string(), ":localhost 403 alice #nope :No such channel");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod line;
pub mod message;
pub mod prefix;
pub mod response;

pub use command::Command;
pub use error::{MessageParseError, ProtocolError};
pub use line::LineCodec;
pub use message::Message;
pub use prefix::Prefix;
pub use response::Response;
