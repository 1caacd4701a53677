//! Message prefix (source).
//!
//! A prefix identifies the origin of a message: either the server itself
//! or a user's `nick!user@host` mask.

use std::fmt;

/// Origin of a message.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Prefix {
    /// Server name (e.g. `localhost`)
    ServerName(String),
    /// User prefix: (nickname, username, hostname)
    Nickname(String, String, String),
}

impl Prefix {
    /// Create a user prefix from nick, user and host components.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Parse a prefix leniently.
    ///
    /// Anything containing `!` or `@` is a user mask; anything else is
    /// taken as a server name.
    pub fn new_from_str(s: &str) -> Self {
        if !s.contains('!') && !s.contains('@') {
            return Prefix::ServerName(s.to_string());
        }
        let (nick_user, host) = s.split_once('@').unwrap_or((s, ""));
        let (nick, user) = nick_user.split_once('!').unwrap_or((nick_user, ""));
        Prefix::Nickname(nick.to_string(), user.to_string(), host.to_string())
    }

    /// Get the nickname if this is a user prefix.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) if !nick.is_empty() => Some(nick),
            _ => None,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{}", user)?;
                }
                if !host.is_empty() {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_mask_round_trips() {
        let p = Prefix::new_from_str("alice!al@127.0.0.1");
        assert_eq!(p, Prefix::new("alice", "al", "127.0.0.1"));
        assert_eq!(p.to_string(), "alice!al@127.0.0.1");
        assert_eq!(p.nick(), Some("alice"));
    }

    #[test]
    fn bare_name_is_a_server() {
        let p = Prefix::new_from_str("localhost");
        assert_eq!(p, Prefix::ServerName("localhost".into()));
        assert_eq!(p.nick(), None);
    }
}
