//! In-memory session store holding the latest results per client session.
//!
//! Sessions live only as long as the process. When the store is full, the least recently
//! updated session is evicted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::analyzer::MatchResult;

/// Latest outputs produced for one session. Each field is replaced, never merged.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub session_id: Uuid,
    pub analysis: Option<MatchResult>,
    pub improved_bullets: Option<String>,
    pub tailored_resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    fn new(session_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            analysis: None,
            improved_bullets: None,
            tailored_resume: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionState>>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Returns a snapshot of the session, if it exists.
    pub async fn get(&self, session_id: Uuid) -> Option<SessionState> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    /// Fails with `NotFound` when a `session_id` is given but unknown.
    pub async fn ensure_exists(&self, session_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(id) = session_id {
            if self.get(id).await.is_none() {
                return Err(session_not_found(id));
            }
        }
        Ok(())
    }

    /// Applies `update` to an existing session, or to a fresh one when `session_id` is `None`.
    /// Returns the id of the session that was written.
    pub async fn update<F>(&self, session_id: Option<Uuid>, update: F) -> Result<Uuid, AppError>
    where
        F: FnOnce(&mut SessionState),
    {
        self.write(session_id, false, update).await
    }

    /// Like `update`, but a session evicted since it was last checked is re-created under the
    /// same id. Handlers call this after a slow LLM call so the generated text is not lost.
    pub async fn restore_and_update<F>(
        &self,
        session_id: Option<Uuid>,
        update: F,
    ) -> Result<Uuid, AppError>
    where
        F: FnOnce(&mut SessionState),
    {
        self.write(session_id, true, update).await
    }

    async fn write<F>(
        &self,
        session_id: Option<Uuid>,
        restore: bool,
        update: F,
    ) -> Result<Uuid, AppError>
    where
        F: FnOnce(&mut SessionState),
    {
        let mut sessions = self.sessions.write().await;

        let id = match session_id {
            Some(id) if sessions.contains_key(&id) => id,
            Some(id) if restore => {
                self.insert_fresh(&mut sessions, id);
                debug!("Restored evicted session {id}");
                id
            }
            Some(id) => return Err(session_not_found(id)),
            None => {
                let id = Uuid::new_v4();
                self.insert_fresh(&mut sessions, id);
                debug!("Created session {id}");
                id
            }
        };

        if let Some(state) = sessions.get_mut(&id) {
            update(state);
            state.updated_at = Utc::now();
        }

        Ok(id)
    }

    fn insert_fresh(&self, sessions: &mut HashMap<Uuid, SessionState>, id: Uuid) {
        if sessions.len() >= self.capacity {
            evict_oldest(sessions);
        }
        sessions.insert(id, SessionState::new(id));
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

fn evict_oldest(sessions: &mut HashMap<Uuid, SessionState>) {
    let oldest = sessions
        .values()
        .min_by_key(|s| s.updated_at)
        .map(|s| s.session_id);
    if let Some(id) = oldest {
        sessions.remove(&id);
        debug!("Evicted session {id}");
    }
}
