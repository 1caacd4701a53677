//! Connection registry: a generational arena of sessions.

use super::session::Session;
use super::uid::SessionId;

struct Slot {
    generation: u32,
    session: Option<Session>,
}

/// Owns every live [`Session`], keyed by [`SessionId`].
///
/// Removed slots are recycled, but with a bumped generation, so lookups with
/// a stale id return `None` instead of a newer session.
#[derive(Default)]
pub struct ConnectionRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session and return its new id.
    pub fn insert(&mut self, session: Session) -> SessionId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.session = Some(session);
            return SessionId::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            session: Some(session),
        });
        SessionId::new(index, 0)
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.session.as_ref())
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.session.as_mut())
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a session, invalidating its id.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        let slot = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())?;
        let session = slot.session.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as u32);
        self.live -= 1;
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
