//! Nickname index and nickname syntax.

use super::uid::SessionId;
use std::collections::HashMap;

/// Characters that may not appear anywhere in a nickname.
const FORBIDDEN_CHARS: &[char] = &[' ', ',', '*', '?', '!', '@'];

/// Characters a nickname may not start with.
const FORBIDDEN_FIRST: &[char] = &['#', '&', ':'];

/// Why a nickname claim was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    /// Another live session holds the name.
    InUse,
}

/// Unique mapping nickname → session. Comparison is exact (case-sensitive).
#[derive(Debug, Default)]
pub struct NickIndex {
    by_nick: HashMap<String, SessionId>,
}

impl NickIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, nick: &str) -> Option<SessionId> {
        self.by_nick.get(nick).copied()
    }

    /// Map `nick` to `id`, releasing `previous` (the session's old nick) on
    /// success. Fails without mutating anything if another session holds it.
    pub fn claim(
        &mut self,
        nick: &str,
        id: SessionId,
        previous: Option<&str>,
    ) -> Result<(), ClaimError> {
        match self.by_nick.get(nick) {
            Some(holder) if *holder != id => return Err(ClaimError::InUse),
            _ => {}
        }
        if let Some(old) = previous
            && old != nick
            && self.by_nick.get(old) == Some(&id)
        {
            self.by_nick.remove(old);
        }
        self.by_nick.insert(nick.to_string(), id);
        Ok(())
    }

    /// Drop the mapping for `nick` if it belongs to `id`.
    pub fn release(&mut self, nick: &str, id: SessionId) {
        if self.by_nick.get(nick) == Some(&id) {
            self.by_nick.remove(nick);
        }
    }

    pub fn len(&self) -> usize {
        self.by_nick.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_nick.is_empty()
    }
}

/// Whether `nick` is an acceptable nickname of at most `max_len` characters.
pub fn is_valid_nick(nick: &str, max_len: usize) -> bool {
    let Some(first) = nick.chars().next() else {
        return false;
    };
    if nick.chars().count() > max_len {
        return false;
    }
    if FORBIDDEN_FIRST.contains(&first) || first.is_ascii_digit() {
        return false;
    }
    !nick.contains(FORBIDDEN_CHARS)
}
