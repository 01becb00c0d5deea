use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::machine::{Transition, WizardState};

/// Identifier for a live wizard session held between HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftSessionId(pub String);

impl DraftSessionId {
    /// Random v4 id; draft ids must not be guessable from one another.
    pub fn generate() -> Self {
        Self(format!("draft-{}", Uuid::new_v4().simple()))
    }
}

impl fmt::Display for DraftSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSession {
    pub session_id: DraftSessionId,
    pub state: WizardState,
    /// Clock millis of the last accepted event.
    pub touched_at: i64,
}

/// Result of an atomic read-transition-write on one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    pub previous: WizardState,
    pub transition: Transition,
}

/// Holding area for sessions that have not yet exited or completed.
pub trait DraftSessionStore: Send + Sync {
    fn insert(&self, session: DraftSession) -> Result<DraftSession, SessionStoreError>;
    fn fetch(&self, id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError>;

    /// Run `change` against the stored state while holding the session
    /// exclusively. `Continue` replaces the state and stamps `touched_at`;
    /// `Exited` and `Completed` remove the session. A session that is gone by
    /// the time the change runs yields `NotFound`, so two racing submissions
    /// cannot both complete.
    fn modify<F>(
        &self,
        id: &DraftSessionId,
        touched_at: i64,
        change: F,
    ) -> Result<SessionUpdate, SessionStoreError>
    where
        F: FnOnce(&WizardState) -> Transition;

    fn remove(&self, id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError>;

    /// Drop every session last touched before `idle_since`; returns the count.
    fn remove_idle(&self, idle_since: i64) -> Result<usize, SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store. Sessions vanish on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDraftSessionStore {
    sessions: Arc<Mutex<HashMap<DraftSessionId, DraftSession>>>,
}

impl InMemoryDraftSessionStore {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<DraftSessionId, DraftSession>>, SessionStoreError>
    {
        self.sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DraftSessionStore for InMemoryDraftSessionStore {
    fn insert(&self, session: DraftSession) -> Result<DraftSession, SessionStoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&session.session_id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(session.session_id.clone(), session.clone());
        Ok(session)
    }

    fn fetch(&self, id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn modify<F>(
        &self,
        id: &DraftSessionId,
        touched_at: i64,
        change: F,
    ) -> Result<SessionUpdate, SessionStoreError>
    where
        F: FnOnce(&WizardState) -> Transition,
    {
        let mut guard = self.lock()?;
        let session = guard.get_mut(id).ok_or(SessionStoreError::NotFound)?;
        let transition = change(&session.state);

        let previous = match &transition {
            Transition::Continue(next) => {
                session.touched_at = touched_at;
                std::mem::replace(&mut session.state, next.clone())
            }
            Transition::Exited | Transition::Completed(_) => guard
                .remove(id)
                .map(|session| session.state)
                .ok_or(SessionStoreError::NotFound)?,
        };

        Ok(SessionUpdate {
            previous,
            transition,
        })
    }

    fn remove(&self, id: &DraftSessionId) -> Result<Option<DraftSession>, SessionStoreError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(id))
    }

    fn remove_idle(&self, idle_since: i64) -> Result<usize, SessionStoreError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|_, session| session.touched_at >= idle_since);
        Ok(before - guard.len())
    }
}
