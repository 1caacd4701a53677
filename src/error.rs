//! Unified error handling for ircserv.
//!
//! Every rejection a handler can produce is a variant here, and every
//! variant maps to exactly one numeric reply. Handlers return the error;
//! the dispatcher turns it into the reply.

use ircserv_proto::{Message, Response};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("no recipient given")]
    NoRecipient,

    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("not registered")]
    NotRegistered,

    #[error("password required")]
    PasswordRequired,

    #[error("password incorrect")]
    PasswordMismatch,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{channel}: {source}")]
    Channel {
        channel: String,
        #[source]
        source: ChannelError,
    },

    #[error(transparent)]
    Mode(#[from] ModeError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Wrap a channel error with the channel it concerns.
    pub fn channel(channel: &str, source: ChannelError) -> Self {
        Self::Channel {
            channel: channel.to_string(),
            source,
        }
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NoRecipient => "no_recipient",
            Self::NoNicknameGiven => "no_nickname_given",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NotRegistered => "not_registered",
            Self::PasswordRequired => "password_required",
            Self::PasswordMismatch => "password_mismatch",
            Self::AlreadyRegistered => "already_registered",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Channel { source, .. } => source.error_code(),
            Self::Mode(e) => e.error_code(),
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to a numeric reply.
    ///
    /// Returns `None` only for internal errors, which have no client-visible
    /// form.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let (response, args) = match self {
            Self::NeedMoreParams => (
                Response::ERR_NEEDMOREPARAMS,
                vec![nick, cmd_name, "Not enough parameters"],
            ),
            Self::NoRecipient => {
                let text = format!("No recipient given ({})", cmd_name);
                return Some(numeric(server_name, Response::ERR_NORECIPIENT, &[nick, &text]));
            }
            Self::NoNicknameGiven => (
                Response::ERR_NONICKNAMEGIVEN,
                vec![nick, "No nickname given"],
            ),
            Self::ErroneousNickname(bad) => (
                Response::ERR_ERRONEUSNICKNAME,
                vec![nick, bad.as_str(), "Erroneous nickname"],
            ),
            Self::NicknameInUse(taken) => (
                Response::ERR_NICKNAMEINUSE,
                vec![nick, taken.as_str(), "Nickname is already in use"],
            ),
            Self::NoSuchNick(target) => (
                Response::ERR_NOSUCHNICK,
                vec![nick, target.as_str(), "No such nick"],
            ),
            Self::NoSuchChannel(chan) => (
                Response::ERR_NOSUCHCHANNEL,
                vec![nick, chan.as_str(), "No such channel"],
            ),
            Self::NotRegistered => (
                Response::ERR_NOTREGISTERED,
                vec![nick, "You have not registered"],
            ),
            Self::PasswordRequired => (
                Response::ERR_NOTREGISTERED,
                vec![nick, "Password required"],
            ),
            Self::PasswordMismatch => (
                Response::ERR_PASSWDMISMATCH,
                vec![nick, "Password incorrect"],
            ),
            Self::AlreadyRegistered => (
                Response::ERR_ALREADYREGISTRED,
                vec![nick, "You may not reregister"],
            ),
            Self::UnknownCommand(cmd) => (
                Response::ERR_UNKNOWNCOMMAND,
                vec![nick, cmd.as_str(), "Unknown command"],
            ),
            Self::Channel { channel, source } => {
                return Some(source.to_irc_reply(server_name, nick, channel));
            }
            Self::Mode(e) => return Some(e.to_irc_reply(server_name, nick)),
            Self::Internal(_) => return None,
        };
        Some(numeric(server_name, response, &args))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

fn numeric(server_name: &str, response: Response, args: &[&str]) -> Message {
    Message::numeric(
        server_name,
        response,
        args.iter().map(|a| a.to_string()).collect(),
    )
}

// ============================================================================
// Channel Errors (membership and permission checks)
// ============================================================================

/// Channel operation errors.
///
/// Admission failures come from [`crate::state::Channel::check_admission`];
/// the rest are raised by handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("no permission to change the topic")]
    TopicPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("user {0} is already on that channel")]
    UserOnChannel(String),

    #[error("already on channel")]
    AlreadyOnChannel,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,
}

impl ChannelError {
    /// Get a static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotOnChannel => "not_on_channel",
            Self::ChanOpPrivsNeeded | Self::TopicPrivsNeeded => "chanop_privs_needed",
            Self::UserNotInChannel(_) => "user_not_in_channel",
            Self::UserOnChannel(_) | Self::AlreadyOnChannel => "user_on_channel",
            Self::InviteOnlyChan => "invite_only_chan",
            Self::ChannelIsFull => "channel_is_full",
            Self::BadChannelKey => "bad_channel_key",
        }
    }

    /// Convert to a numeric reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, channel: &str) -> Message {
        let (response, args) = match self {
            Self::NotOnChannel => (
                Response::ERR_NOTONCHANNEL,
                vec![nick, channel, "You're not on that channel"],
            ),
            Self::ChanOpPrivsNeeded => (
                Response::ERR_CHANOPRIVSNEEDED,
                vec![nick, channel, "You're not channel operator"],
            ),
            Self::TopicPrivsNeeded => (
                Response::ERR_CHANOPRIVSNEEDED,
                vec![nick, channel, "You do not have permission to change the topic"],
            ),
            Self::UserNotInChannel(target) => (
                Response::ERR_USERNOTINCHANNEL,
                vec![nick, target.as_str(), channel, "They aren't on that channel"],
            ),
            Self::UserOnChannel(target) => (
                Response::ERR_USERONCHANNEL,
                vec![nick, target.as_str(), channel, "is already on channel"],
            ),
            Self::AlreadyOnChannel => (
                Response::ERR_USERONCHANNEL,
                vec![nick, channel, "You are already in the channel"],
            ),
            Self::InviteOnlyChan => (
                Response::ERR_INVITEONLYCHAN,
                vec![nick, channel, "Cannot join channel (+i)"],
            ),
            Self::ChannelIsFull => (
                Response::ERR_CHANNELISFULL,
                vec![nick, channel, "Cannot join channel (+l)"],
            ),
            Self::BadChannelKey => (
                Response::ERR_BADCHANNELKEY,
                vec![nick, channel, "Cannot join channel (+k)"],
            ),
        };
        numeric(server_name, response, &args)
    }
}

// ============================================================================
// Mode Errors (mode token decoding)
// ============================================================================

/// Failures decoding a `MODE` token and parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    #[error("invalid user limit: {0:?}")]
    InvalidLimit(String),

    #[error("mode {0} needs a parameter")]
    MissingParameter(String),
}

impl ModeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMode(_) => "unknown_mode",
            Self::InvalidLimit(_) => "invalid_limit",
            Self::MissingParameter(_) => "need_more_params",
        }
    }

    /// Convert to a numeric reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> Message {
        let (response, args) = match self {
            Self::UnknownMode(mode) => (
                Response::ERR_UNKNOWNMODE,
                vec![nick, mode.as_str(), "is unknown mode char to me"],
            ),
            Self::InvalidLimit(_) => (
                Response::ERR_NEEDMOREPARAMS,
                vec![nick, "MODE", "Invalid user limit parameter"],
            ),
            Self::MissingParameter(_) => (
                Response::ERR_NEEDMOREPARAMS,
                vec![nick, "MODE", "Not enough parameters"],
            ),
        };
        numeric(server_name, response, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(HandlerError::NeedMoreParams.error_code(), "need_more_params");
        assert_eq!(HandlerError::NotRegistered.error_code(), "not_registered");
        assert_eq!(HandlerError::Internal("test".into()).error_code(), "internal_error");
        assert_eq!(
            HandlerError::channel("#a", ChannelError::BadChannelKey).error_code(),
            "bad_channel_key"
        );
    }

    #[test]
    fn test_handler_error_to_irc_reply() {
        let reply = HandlerError::NeedMoreParams
            .to_irc_reply("localhost", "alice", "JOIN")
            .unwrap();
        assert_eq!(reply.to_string(), ":localhost 461 alice JOIN :Not enough parameters");

        let reply = HandlerError::NoRecipient
            .to_irc_reply("localhost", "alice", "PRIVMSG")
            .unwrap();
        assert_eq!(reply.to_string(), ":localhost 411 alice :No recipient given (PRIVMSG)");

        // Internal errors don't generate replies
        let reply = HandlerError::Internal("oops".into()).to_irc_reply("localhost", "alice", "JOIN");
        assert!(reply.is_none());
    }

    #[test]
    fn test_password_errors_use_star_before_nick() {
        let reply = HandlerError::PasswordMismatch
            .to_irc_reply("localhost", "*", "PASS")
            .unwrap();
        assert_eq!(reply.to_string(), ":localhost 464 * :Password incorrect");

        let reply = HandlerError::PasswordRequired
            .to_irc_reply("localhost", "*", "NICK")
            .unwrap();
        assert_eq!(reply.to_string(), ":localhost 451 * :Password required");
    }

    #[test]
    fn test_channel_error_to_irc_reply() {
        let reply = ChannelError::BadChannelKey.to_irc_reply("localhost", "carol", "#room");
        assert_eq!(reply.response(), Some(Response::ERR_BADCHANNELKEY));
        assert_eq!(reply.to_string(), ":localhost 475 carol #room :Cannot join channel (+k)");

        let reply = HandlerError::channel("#room", ChannelError::UserNotInChannel("dave".into()))
            .to_irc_reply("localhost", "alice", "KICK")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":localhost 441 alice dave #room :They aren't on that channel"
        );
    }

    #[test]
    fn test_mode_error_to_irc_reply() {
        let reply = ModeError::UnknownMode("-x".into()).to_irc_reply("localhost", "alice");
        assert_eq!(reply.to_string(), ":localhost 472 alice -x :is unknown mode char to me");

        let reply = ModeError::InvalidLimit("ten".into()).to_irc_reply("localhost", "alice");
        assert_eq!(reply.to_string(), ":localhost 461 alice MODE :Invalid user limit parameter");
    }
}
