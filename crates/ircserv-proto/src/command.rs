//! Protocol commands and their serialization.
//!
//! Each variant carries its parameters in wire order. Variants whose last
//! parameter is free text (PRIVMSG, TOPIC, KICK reason, ...) always emit it
//! as a `:trailing` parameter; other variants only do so when the last
//! parameter would otherwise be ambiguous.

use std::fmt::{self, Write};

use crate::response::Response;

/// A protocol command with its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    /// `PASS <password>`
    PASS(String),
    /// `NICK <nickname>`
    NICK(String),
    /// `USER <username> <hostname> <servername> :<realname>`
    USER(String, String, String, String),
    /// `JOIN <channel> [key]`
    JOIN(String, Option<String>),
    /// `PART <channel> [:reason]`
    PART(String, Option<String>),
    /// `QUIT [:reason]`
    QUIT(Option<String>),
    /// `PRIVMSG <target> :<text>`
    PRIVMSG(String, String),
    /// `TOPIC <channel> [:topic]`
    TOPIC(String, Option<String>),
    /// `KICK <channel> <nick> [:reason]`
    KICK(String, String, Option<String>),
    /// `INVITE <nick> <channel>`
    INVITE(String, String),
    /// `MODE <target> [modestring [args...]]`
    MODE(String, Vec<String>),
    /// `PING <token>`
    PING(String),
    /// `PONG <server> [:token]`
    PONG(String, Option<String>),
    /// `CAP <target> <subcommand> [:capabilities]`
    CAP(String, String, Option<String>),
    /// `ERROR :<message>`
    ERROR(String),
    /// Numeric reply with its arguments; the last argument is the human text.
    Response(Response, Vec<String>),
    /// Any other command, kept verbatim.
    Raw(String, Vec<String>),
}

impl Command {
    /// Build a command from a name and already-split parameters.
    ///
    /// Unknown names, and known names with too few parameters, become
    /// [`Command::Raw`]. Three-digit names map to [`Command::Response`]
    /// when the code is known.
    pub fn from_parts(name: &str, params: Vec<String>) -> Command {
        if name.len() == 3 && name.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(resp) = name.parse::<u16>().ok().and_then(Response::from_code) {
                return Command::Response(resp, params);
            }
            return Command::Raw(name.to_string(), params);
        }
        if params.len() < min_params(name) {
            return Command::Raw(name.to_string(), params);
        }

        let mut it = params.into_iter();
        match name {
            "PASS" => Command::PASS(take(&mut it)),
            "NICK" => Command::NICK(take(&mut it)),
            "USER" => {
                let user = take(&mut it);
                let host = take(&mut it);
                let server = take(&mut it);
                Command::USER(user, host, server, take(&mut it))
            }
            "JOIN" => {
                let chan = take(&mut it);
                Command::JOIN(chan, it.next())
            }
            "PART" => {
                let chan = take(&mut it);
                Command::PART(chan, it.next())
            }
            "QUIT" => Command::QUIT(it.next()),
            "PRIVMSG" => {
                let target = take(&mut it);
                Command::PRIVMSG(target, take(&mut it))
            }
            "TOPIC" => {
                let chan = take(&mut it);
                Command::TOPIC(chan, it.next())
            }
            "KICK" => {
                let chan = take(&mut it);
                let nick = take(&mut it);
                Command::KICK(chan, nick, it.next())
            }
            "INVITE" => {
                let nick = take(&mut it);
                Command::INVITE(nick, take(&mut it))
            }
            "MODE" => {
                let target = take(&mut it);
                Command::MODE(target, it.collect())
            }
            "PING" => Command::PING(take(&mut it)),
            "PONG" => {
                let server = take(&mut it);
                Command::PONG(server, it.next())
            }
            "CAP" => {
                let target = take(&mut it);
                let sub = take(&mut it);
                Command::CAP(target, sub, it.next())
            }
            "ERROR" => Command::ERROR(take(&mut it)),
            _ => Command::Raw(name.to_string(), it.collect()),
        }
    }
}

fn min_params(name: &str) -> usize {
    match name {
        "USER" => 4,
        "KICK" | "CAP" | "PRIVMSG" | "INVITE" => 2,
        "PASS" | "NICK" | "JOIN" | "PART" | "TOPIC" | "MODE" | "PING" | "PONG" | "ERROR" => 1,
        _ => 0,
    }
}

fn take(it: &mut std::vec::IntoIter<String>) -> String {
    it.next().unwrap_or_default()
}

/// Whether a final parameter must be written with a leading `:`.
pub fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Write `cmd` followed by `args`; the last argument gets a colon only when needed.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, middle)) = args.split_last() else {
        return Ok(());
    };
    for arg in middle {
        f.write_char(' ')?;
        f.write_str(arg)?;
    }
    f.write_char(' ')?;
    if needs_colon_prefix(last) {
        f.write_char(':')?;
    }
    f.write_str(last)
}

/// Write `cmd` followed by `args`; the last argument is always trailing.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, middle)) = args.split_last() else {
        return Ok(());
    };
    for arg in middle {
        f.write_char(' ')?;
        f.write_str(arg)?;
    }
    f.write_str(" :")?;
    f.write_str(last)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write_cmd(f, "PASS", &[p]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::USER(u, h, s, r) => write_cmd_freeform(f, "USER", &[u, h, s, r]),
            Command::JOIN(c, Some(k)) => write_cmd(f, "JOIN", &[c, k]),
            Command::JOIN(c, None) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c, Some(r)) => write_cmd_freeform(f, "PART", &[c, r]),
            Command::PART(c, None) => write_cmd(f, "PART", &[c]),
            Command::QUIT(Some(r)) => write_cmd_freeform(f, "QUIT", &[r]),
            Command::QUIT(None) => write_cmd(f, "QUIT", &[]),
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::TOPIC(c, Some(t)) => write_cmd_freeform(f, "TOPIC", &[c, t]),
            Command::TOPIC(c, None) => write_cmd(f, "TOPIC", &[c]),
            Command::KICK(c, n, Some(r)) => write_cmd_freeform(f, "KICK", &[c, n, r]),
            Command::KICK(c, n, None) => write_cmd(f, "KICK", &[c, n]),
            Command::INVITE(n, c) => write_cmd(f, "INVITE", &[n, c]),
            Command::MODE(t, args) => {
                let mut all: Vec<&str> = Vec::with_capacity(args.len() + 1);
                all.push(t);
                all.extend(args.iter().map(String::as_str));
                write_cmd(f, "MODE", &all)
            }
            Command::PING(t) => write_cmd(f, "PING", &[t]),
            Command::PONG(s, Some(t)) => write_cmd_freeform(f, "PONG", &[s, t]),
            Command::PONG(s, None) => write_cmd(f, "PONG", &[s]),
            Command::CAP(t, sub, Some(caps)) => write_cmd_freeform(f, "CAP", &[t, sub, caps]),
            Command::CAP(t, sub, None) => write_cmd(f, "CAP", &[t, sub]),
            Command::ERROR(m) => write_cmd_freeform(f, "ERROR", &[m]),
            Command::Response(resp, args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd_freeform(f, &resp.to_string(), &args)
            }
            Command::Raw(name, args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd(f, name, &args)
            }
        }
    }
}
