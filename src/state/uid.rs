//! Session identifiers.

use std::fmt;

/// Identity of one accepted connection.
///
/// An id is an arena slot plus the generation that slot had when the
/// session was created. Freeing a slot bumps its generation, so an id held
/// past its session's lifetime never matches the slot's next occupant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SessionId {
    index: u32,
    generation: u32,
}

impl SessionId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot of this session.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this session was created.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}
