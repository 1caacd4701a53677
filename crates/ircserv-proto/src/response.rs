//! Numeric reply codes.
//!
//! Only the numerics the server actually emits are listed. Names follow
//! RFC 2812 spelling (including `ERR_ALREADYREGISTRED`).

#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;

/// Numeric server reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Connection Registration ===
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 002 - Your host is ...
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,

    // === Command Replies ===
    /// 331 - No topic is set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 341 - Invite (and direct message) acknowledgement
    RPL_INVITING = 341,
    /// 353 - Channel roster
    RPL_NAMREPLY = 353,
    /// 366 - End of roster
    RPL_ENDOFNAMES = 366,

    // === Errors ===
    /// 401 - No such nick
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 411 - No recipient given
    ERR_NORECIPIENT = 411,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 431 - No nickname given
    ERR_NONICKNAMEGIVEN = 431,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
    /// 441 - They aren't on that channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - You're not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 443 - Already on channel
    ERR_USERONCHANNEL = 443,
    /// 451 - You have not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - You may not reregister
    ERR_ALREADYREGISTRED = 462,
    /// 464 - Password incorrect
    ERR_PASSWDMISMATCH = 464,
    /// 471 - Channel is full (+l)
    ERR_CHANNELISFULL = 471,
    /// 472 - Unknown mode char
    ERR_UNKNOWNMODE = 472,
    /// 473 - Invite only channel (+i)
    ERR_INVITEONLYCHAN = 473,
    /// 475 - Bad channel key (+k)
    ERR_BADCHANNELKEY = 475,
    /// 482 - You're not channel operator
    ERR_CHANOPRIVSNEEDED = 482,
}

const ALL: &[Response] = &[
    Response::RPL_WELCOME,
    Response::RPL_YOURHOST,
    Response::RPL_CREATED,
    Response::RPL_NOTOPIC,
    Response::RPL_TOPIC,
    Response::RPL_INVITING,
    Response::RPL_NAMREPLY,
    Response::RPL_ENDOFNAMES,
    Response::ERR_NOSUCHNICK,
    Response::ERR_NOSUCHCHANNEL,
    Response::ERR_NORECIPIENT,
    Response::ERR_UNKNOWNCOMMAND,
    Response::ERR_NONICKNAMEGIVEN,
    Response::ERR_ERRONEUSNICKNAME,
    Response::ERR_NICKNAMEINUSE,
    Response::ERR_USERNOTINCHANNEL,
    Response::ERR_NOTONCHANNEL,
    Response::ERR_USERONCHANNEL,
    Response::ERR_NOTREGISTERED,
    Response::ERR_NEEDMOREPARAMS,
    Response::ERR_ALREADYREGISTRED,
    Response::ERR_PASSWDMISMATCH,
    Response::ERR_CHANNELISFULL,
    Response::ERR_UNKNOWNMODE,
    Response::ERR_INVITEONLYCHAN,
    Response::ERR_BADCHANNELKEY,
    Response::ERR_CHANOPRIVSNEEDED,
];

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Creates a Response from a numeric code
    pub fn from_code(code: u16) -> Option<Response> {
        ALL.iter().copied().find(|r| r.code() == code)
    }

    /// Check if this is an error response (4xx, 5xx)
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

/// Error returned when a string is not a known numeric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown numeric: {0}")]
pub struct ParseResponseError(String);

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .ok()
            .and_then(Response::from_code)
            .ok_or_else(|| ParseResponseError(s.to_string()))
    }
}
