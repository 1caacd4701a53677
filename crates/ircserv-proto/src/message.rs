//! Owned protocol messages.
//!
//! A [`Message`] serializes to the canonical line form
//! `[:prefix ]COMMAND[ params][ :trailing]` (without the line terminator,
//! which the [`crate::LineCodec`] appends).

use std::fmt;
use std::str::FromStr;

use crate::command::Command;
use crate::error::MessageParseError;
use crate::prefix::Prefix;
use crate::response::Response;

/// A complete protocol message.
///
/// # Example
///
/// ```
/// use ircserv_proto::{Command, Message};
///
/// let msg: Message = ":bob!bob@10.0.0.2 JOIN #room".parse().unwrap();
/// assert_eq!(msg.source_nickname(), Some("bob"));
/// assert_eq!(msg.command, Command::JOIN("#room".into(), None));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Message prefix/source (e.g., `nick!user@host`).
    pub prefix: Option<Prefix>,
    /// The command and its parameters.
    pub command: Command,
}

impl Message {
    /// Build a numeric reply sourced from `server`.
    pub fn numeric(server: &str, response: Response, args: Vec<String>) -> Self {
        Message {
            prefix: Some(Prefix::ServerName(server.to_string())),
            command: Command::Response(response, args),
        }
    }

    /// Replace the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Get the nickname from the message prefix, if present.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    /// The numeric code when this message is a numeric reply.
    pub fn response(&self) -> Option<Response> {
        match self.command {
            Command::Response(resp, _) => Some(resp),
            _ => None,
        }
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Message {
            prefix: None,
            command,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        write!(f, "{}", self.command)
    }
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_end_matches(['\r', '\n']).trim_start_matches(' ');
        if line.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let (prefix, rest) = match line.strip_prefix(':') {
            Some(stripped) => match stripped.split_once(' ') {
                Some((p, rest)) => (Some(Prefix::new_from_str(p)), rest.trim_start_matches(' ')),
                None => return Err(MessageParseError::MissingCommand),
            },
            None => (None, line),
        };

        let (name, mut params_str) = rest.split_once(' ').unwrap_or((rest, ""));
        if name.is_empty() {
            return Err(MessageParseError::MissingCommand);
        }

        let mut params = Vec::new();
        loop {
            params_str = params_str.trim_start_matches(' ');
            if params_str.is_empty() {
                break;
            }
            if let Some(trailing) = params_str.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            let (param, rest) = params_str.split_once(' ').unwrap_or((params_str, ""));
            params.push(param.to_string());
            params_str = rest;
        }

        Ok(Message {
            prefix,
            command: Command::from_parts(name, params),
        })
    }
}
