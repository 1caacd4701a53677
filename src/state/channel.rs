//! Channels and the channel registry.
//!
//! A channel holds only session ids; each session's own channel list is
//! the back-reference. [`crate::state::Matrix`] keeps both sides in step.

use super::uid::SessionId;
use crate::error::ChannelError;
use std::collections::{BTreeSet, HashMap};

/// A named chat room.
///
/// Invariant: `operators ⊆ members`. Every mutator below preserves it.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    /// Empty when no topic is set.
    pub topic: String,
    pub topic_restricted: bool,
    pub invite_only: bool,
    pub key: Option<String>,
    /// Maximum member count; 0 means unlimited.
    pub limit: usize,
    members: BTreeSet<SessionId>,
    operators: BTreeSet<SessionId>,
    invited: BTreeSet<SessionId>,
}

impl Channel {
    /// A fresh channel whose founder is its sole member and operator.
    pub fn new(name: impl Into<String>, founder: SessionId) -> Self {
        Self {
            name: name.into(),
            topic: String::new(),
            topic_restricted: false,
            invite_only: false,
            key: None,
            limit: 0,
            members: BTreeSet::from([founder]),
            operators: BTreeSet::from([founder]),
            invited: BTreeSet::new(),
        }
    }

    pub fn is_member(&self, id: SessionId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_operator(&self, id: SessionId) -> bool {
        self.operators.contains(&id)
    }

    pub fn is_invited(&self, id: SessionId) -> bool {
        self.invited.contains(&id)
    }

    pub fn members(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.members.iter().copied()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Gate a join by invite-only, then user limit, then key.
    pub fn check_admission(&self, id: SessionId, key: Option<&str>) -> Result<(), ChannelError> {
        if self.invite_only && !self.is_invited(id) {
            return Err(ChannelError::InviteOnlyChan);
        }
        if self.limit > 0 && self.members.len() >= self.limit {
            return Err(ChannelError::ChannelIsFull);
        }
        if let Some(expected) = &self.key
            && key != Some(expected.as_str())
        {
            return Err(ChannelError::BadChannelKey);
        }
        Ok(())
    }

    /// Add a member, consuming any pending invitation.
    pub fn add_member(&mut self, id: SessionId) {
        self.invited.remove(&id);
        self.members.insert(id);
    }

    /// Remove `id` from the member, operator and invite sets.
    ///
    /// Returns whether it was a member.
    pub fn remove(&mut self, id: SessionId) -> bool {
        self.operators.remove(&id);
        self.invited.remove(&id);
        self.members.remove(&id)
    }

    pub fn invite(&mut self, id: SessionId) {
        self.invited.insert(id);
    }

    pub fn revoke_invite(&mut self, id: SessionId) {
        self.invited.remove(&id);
    }

    /// Grant operator status if absent, revoke it if present.
    ///
    /// Returns the new status, or `None` when `id` is not a member.
    pub fn toggle_operator(&mut self, id: SessionId) -> Option<bool> {
        if !self.is_member(id) {
            return None;
        }
        if self.operators.remove(&id) {
            Some(false)
        } else {
            self.operators.insert(id);
            Some(true)
        }
    }
}

/// Whether `name` is a syntactically valid channel name.
///
/// Names start with `#`, have at least one more character, are at most
/// `max_len` characters long and contain no spaces, commas or control
/// characters.
pub fn is_valid_channel_name(name: &str, max_len: usize) -> bool {
    name.starts_with('#')
        && name.chars().count() >= 2
        && name.chars().count() <= max_len
        && !name.chars().any(|c| c == ' ' || c == ',' || c.is_control())
}

/// All live channels, keyed by exact name.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Create `name` with `founder` as its only member and operator.
    ///
    /// An existing channel of the same name is left untouched and returned.
    pub fn create(&mut self, name: &str, founder: SessionId) -> &mut Channel {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name, founder))
    }

    /// Delete `name` if it has no members. Returns whether it was deleted.
    pub fn remove_if_empty(&mut self, name: &str) -> bool {
        if self.channels.get(name).is_some_and(Channel::is_empty) {
            self.channels.remove(name);
            return true;
        }
        false
    }

    /// Forget every pending invitation for `id`.
    pub fn revoke_invites(&mut self, id: SessionId) {
        for chan in self.channels.values_mut() {
            chan.revoke_invite(id);
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
