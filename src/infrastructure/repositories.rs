//! In-memory session store

use crate::config::SiteConfig;
use crate::core::session::SessionState;
use crate::infrastructure::traits::SessionRepository;
use di::{Ref, inject, injectable};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

struct Entry {
    state: SessionState,
    last_seen: u64,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<Uuid, Entry>,
    /// `last_seen` of every entry, oldest first.
    by_last_seen: BTreeMap<u64, Uuid>,
    clock: u64,
}

impl Sessions {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, session_id: Uuid) -> Option<&mut SessionState> {
        let now = self.tick();
        let entry = self.entries.get_mut(&session_id)?;
        self.by_last_seen.remove(&entry.last_seen);
        self.by_last_seen.insert(now, session_id);
        entry.last_seen = now;
        Some(&mut entry.state)
    }

    fn insert(&mut self, session_id: Uuid, state: SessionState) -> &mut SessionState {
        let now = self.tick();
        self.by_last_seen.insert(now, session_id);
        &mut self
            .entries
            .entry(session_id)
            .or_insert(Entry {
                state,
                last_seen: now,
            })
            .state
    }

    fn evict_least_recent(&mut self) {
        if let Some((_, id)) = self.by_last_seen.pop_first() {
            self.entries.remove(&id);
            debug!("evicted session {id}");
        }
    }
}

/// Process-local sessions, least recently used evicted once `capacity` is reached.
pub struct InMemorySessionRepository {
    sessions: Mutex<Sessions>,
    capacity: usize,
}

#[injectable(SessionRepository)]
impl InMemorySessionRepository {
    #[inject]
    pub fn create(config: Ref<SiteConfig>) -> InMemorySessionRepository {
        Self::with_capacity(config.session_capacity)
    }
}

impl InMemorySessionRepository {
    pub fn with_capacity(capacity: usize) -> InMemorySessionRepository {
        InMemorySessionRepository {
            sessions: Mutex::new(Sessions::default()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().entries.len()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn with_session(
        &self,
        session_id: Uuid,
        init: &dyn Fn() -> SessionState,
        f: &mut dyn FnMut(&mut SessionState),
    ) {
        let mut sessions = self.lock();

        if let Some(state) = sessions.touch(session_id) {
            f(state);
            return;
        }

        if sessions.entries.len() >= self.capacity {
            sessions.evict_least_recent();
        }
        info!("new session {session_id}");
        f(sessions.insert(session_id, init()));
    }

    fn with_existing(&self, session_id: Uuid, f: &mut dyn FnMut(&mut SessionState)) -> bool {
        match self.lock().touch(session_id) {
            Some(state) => {
                f(state);
                true
            }
            None => false,
        }
    }
}
