use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::intake::{WizardDraft, WizardStep};

/// Default window during which a saved wizard session can be resumed.
pub const DEFAULT_PROGRESS_TTL_DAYS: i64 = 7;

/// Opaque identifier for a browser session filling in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Snapshot of an in-progress questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    pub draft: WizardDraft,
    pub step: WizardStep,
    pub saved_at: DateTime<Utc>,
}

impl SavedProgress {
    pub fn new(draft: WizardDraft, step: WizardStep, saved_at: DateTime<Utc>) -> Self {
        Self {
            draft,
            step,
            saved_at,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.saved_at)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}

/// Storage port for wizard progress so the calculator service can be exercised in isolation.
pub trait ProgressStore: Send + Sync {
    fn save(&self, session: &SessionId, progress: SavedProgress) -> Result<(), ProgressError>;
    fn load(&self, session: &SessionId) -> Result<Option<SavedProgress>, ProgressError>;
    fn clear(&self, session: &SessionId) -> Result<(), ProgressError>;
    /// Drop every snapshot older than `ttl`, returning how many were removed.
    fn purge_expired(&self, now: DateTime<Utc>, ttl: Duration) -> Result<usize, ProgressError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("progress store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local progress store; contents vanish on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProgressStore {
    sessions: Arc<Mutex<HashMap<SessionId, SavedProgress>>>,
}

impl InMemoryProgressStore {
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn save(&self, session: &SessionId, progress: SavedProgress) -> Result<(), ProgressError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| ProgressError::Unavailable("progress mutex poisoned".to_string()))?;
        guard.insert(session.clone(), progress);
        Ok(())
    }

    fn load(&self, session: &SessionId) -> Result<Option<SavedProgress>, ProgressError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| ProgressError::Unavailable("progress mutex poisoned".to_string()))?;
        Ok(guard.get(session).cloned())
    }

    fn clear(&self, session: &SessionId) -> Result<(), ProgressError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| ProgressError::Unavailable("progress mutex poisoned".to_string()))?;
        guard.remove(session);
        Ok(())
    }

    fn purge_expired(&self, now: DateTime<Utc>, ttl: Duration) -> Result<usize, ProgressError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| ProgressError::Unavailable("progress mutex poisoned".to_string()))?;
        let before = guard.len();
        guard.retain(|_, progress| !progress.is_expired(now, ttl));
        Ok(before - guard.len())
    }
}
