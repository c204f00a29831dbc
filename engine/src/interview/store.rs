//! In-memory session store
//!
//! Maps user ids to conversation slots. The map itself sits behind a
//! `std::sync::Mutex` that is never held across an await; each slot is a
//! `tokio::sync::Mutex` that a request holds for the whole
//! read-modify-write on that user's session, including finalization.
//! Requests for different users never wait on each other.

use super::session::{Conversation, Session};
use sdk::errors::EngineError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Mutex as AsyncMutex;

/// Lockable conversation of one user
pub type Slot = Arc<AsyncMutex<Conversation>>;

/// Result of looking up a user id
pub enum SlotLookup {
    /// No session existed; a fresh one was inserted
    Created,

    /// A session already exists
    Existing(Slot),
}

/// Process-wide session map, constructed once and shared by handle
#[derive(Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<String, Slot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<MutexGuard<'_, HashMap<String, Slot>>, EngineError> {
        self.slots
            .lock()
            .map_err(|_| EngineError::Internal("session store lock poisoned".to_string()))
    }

    /// Return the user's slot, inserting a new session when there is none.
    ///
    /// Check-and-create happens under a single lock, so two first messages
    /// for the same user create exactly one session.
    pub fn get_or_create(&self, user_id: &str) -> Result<SlotLookup, EngineError> {
        let mut slots = self.slots()?;

        match slots.entry(user_id.to_string()) {
            Entry::Occupied(entry) => Ok(SlotLookup::Existing(Arc::clone(entry.get()))),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(AsyncMutex::new(Conversation::Active(
                    Session::new(),
                ))));
                Ok(SlotLookup::Created)
            }
        }
    }

    /// Remove the user's entry if it is still `slot`.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&self, user_id: &str, slot: &Slot) -> Result<bool, EngineError> {
        let mut slots = self.slots()?;

        match slots.get(user_id) {
            Some(current) if Arc::ptr_eq(current, slot) => {
                slots.remove(user_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Copy of the user's active session, if any
    pub async fn snapshot(&self, user_id: &str) -> Result<Option<Session>, EngineError> {
        let slot = {
            let slots = self.slots()?;
            match slots.get(user_id) {
                Some(slot) => Arc::clone(slot),
                None => return Ok(None),
            }
        };

        let conversation = slot.lock().await;
        Ok(match &*conversation {
            Conversation::Active(session) => Some(session.clone()),
            Conversation::Completed => None,
        })
    }

    /// Number of users with a session in memory
    pub fn len(&self) -> Result<usize, EngineError> {
        Ok(self.slots()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, EngineError> {
        Ok(self.slots()?.is_empty())
    }
}
