//! Channel mode changes.
//!
//! A `MODE` token and its parameter are decoded once into a [`ModeChange`];
//! handlers apply the typed value and never look at the raw token again.
//!
//! Both signs are accepted for every letter. `i` and `t` toggle regardless
//! of the sign, `k` sets or clears depending on whether a key is given,
//! `l` sets a limit (0 removes it) and `o` toggles a member's operator status.

use crate::error::ModeError;

/// One decoded channel mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChange {
    /// Flip invite-only.
    InviteOnly,
    /// Flip topic-restricted.
    TopicRestricted,
    /// Set (`Some`) or clear (`None`) the key.
    Key(Option<String>),
    /// Set the user limit; 0 removes it.
    Limit(usize),
    /// Flip operator status of the named member.
    Operator(String),
}

impl ModeChange {
    /// Decode a mode token such as `-k` and its (possibly empty) parameter.
    pub fn parse(token: &str, param: &str) -> Result<Self, ModeError> {
        let mut chars = token.chars();
        let (Some(sign), Some(letter), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ModeError::UnknownMode(token.to_string()));
        };
        if sign != '+' && sign != '-' {
            return Err(ModeError::UnknownMode(token.to_string()));
        }

        match letter {
            'i' => Ok(ModeChange::InviteOnly),
            't' => Ok(ModeChange::TopicRestricted),
            'k' if param.is_empty() => Ok(ModeChange::Key(None)),
            'k' => Ok(ModeChange::Key(Some(param.to_string()))),
            'l' => param
                .parse::<usize>()
                .map(ModeChange::Limit)
                .map_err(|_| ModeError::InvalidLimit(param.to_string())),
            'o' if param.is_empty() => Err(ModeError::MissingParameter(token.to_string())),
            'o' => Ok(ModeChange::Operator(param.to_string())),
            _ => Err(ModeError::UnknownMode(token.to_string())),
        }
    }
}
