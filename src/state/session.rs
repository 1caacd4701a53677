//! Per-connection session state.
//!
//! ## Registration
//!
//! ```text
//! AwaitingPassword ──PASS ok──▶ AwaitingIdentity ──NICK ∧ USER──▶ Registered
//! ```
//!
//! NICK and USER may arrive in either order once the password is verified.
//! The nick-received and user-received flags are `nick.is_some()` and
//! `user.is_some()`; [`Session::try_register`] fires exactly once.

use ircserv_proto::Prefix;
use std::collections::BTreeSet;

/// Where a connection stands in the registration handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationPhase {
    /// Connected; no valid PASS seen yet.
    AwaitingPassword,
    /// Password verified; waiting for NICK and USER.
    AwaitingIdentity,
    /// Fully registered; post-registration commands are accepted.
    Registered,
}

/// Identity supplied by `USER`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub hostname: String,
    pub servername: String,
    pub realname: String,
}

/// Server-side state for one client connection.
#[derive(Debug)]
pub struct Session {
    /// Remote IP address, used as the host part of the user mask.
    pub host: String,
    pub nick: Option<String>,
    pub user: Option<UserInfo>,
    /// Names of channels this session has joined.
    pub channels: BTreeSet<String>,
    pub phase: RegistrationPhase,
}

impl Session {
    pub fn new(host: String) -> Self {
        Self {
            host,
            nick: None,
            user: None,
            channels: BTreeSet::new(),
            phase: RegistrationPhase::AwaitingPassword,
        }
    }

    /// The nick, or `*` before one is set.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    pub fn is_registered(&self) -> bool {
        self.phase == RegistrationPhase::Registered
    }

    pub fn password_verified(&self) -> bool {
        self.phase != RegistrationPhase::AwaitingPassword
    }

    /// `nick!user@host` source prefix for messages this session originates.
    pub fn prefix(&self) -> Prefix {
        let user = self
            .user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or_else(|| self.nick_or_star());
        Prefix::new(self.nick_or_star(), user, self.host.as_str())
    }

    /// Complete registration if both NICK and USER have been received.
    ///
    /// Returns `true` only on the call that performs the transition.
    pub fn try_register(&mut self) -> bool {
        if self.phase == RegistrationPhase::AwaitingIdentity
            && self.nick.is_some()
            && self.user.is_some()
        {
            self.phase = RegistrationPhase::Registered;
            return true;
        }
        false
    }
}
