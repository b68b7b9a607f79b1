use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::engine::TriageAssessment;

/// Identifier assigned by a session store to an appended record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flattened telemetry record for one finished triage session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageSessionRecord {
    pub timestamp: DateTime<Utc>,
    pub severity: i32,
    pub severity_label: String,
    pub injury_type: String,
    pub confidence: i32,
    pub escalated: bool,
    pub escalation_reason: String,
    pub client_context: String,
}

impl TriageSessionRecord {
    pub fn from_assessment(
        assessment: &TriageAssessment,
        client_context: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            severity: assessment.final_severity,
            severity_label: assessment.severity_label.clone(),
            injury_type: assessment.injury_type.clone(),
            confidence: assessment.confidence_level,
            escalated: assessment.escalated,
            escalation_reason: assessment.escalation_reason.clone(),
            client_context: client_context.into(),
        }
    }
}

/// A record together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: SessionId,
    pub record: TriageSessionRecord,
}

/// Append-only sink for triage sessions.
pub trait SessionStore: Send + Sync {
    /// Returns `None` when the store accepted the record without assigning an id.
    fn append(&self, record: TriageSessionRecord) -> Result<Option<SessionId>, SessionStoreError>;
    /// Most recent sessions first.
    fn recent(&self, limit: usize) -> Result<Vec<StoredSession>, SessionStoreError>;
}

/// Error enumeration for session store failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
    #[error("session store rejected record: {0}")]
    Rejected(String),
}

/// Store used when no backend is configured. Accepts and forgets everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionStore;

impl SessionStore for NoopSessionStore {
    fn append(&self, _record: TriageSessionRecord) -> Result<Option<SessionId>, SessionStoreError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<StoredSession>, SessionStoreError> {
        Ok(Vec::new())
    }
}

const DEFAULT_MEMORY_CAPACITY: usize = 1_000;

/// Bounded in-process store; the oldest sessions are evicted first.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    namespace: String,
    capacity: usize,
    sequence: Arc<AtomicU64>,
    sessions: Arc<Mutex<VecDeque<StoredSession>>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new("session", DEFAULT_MEMORY_CAPACITY)
    }
}

impl InMemorySessionStore {
    pub fn new(namespace: impl Into<String>, capacity: usize) -> Self {
        Self {
            namespace: namespace.into(),
            capacity: capacity.max(1),
            sequence: Arc::new(AtomicU64::new(1)),
            sessions: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Number of retained sessions; a poisoned store reports zero.
    pub fn len(&self) -> usize {
        match self.sessions.lock() {
            Ok(guard) => guard.len(),
            Err(_) => {
                warn!(namespace = %self.namespace, "session mutex poisoned; reporting no sessions");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_id(&self) -> SessionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("{}-{id:06}", self.namespace))
    }
}

impl SessionStore for InMemorySessionStore {
    fn append(&self, record: TriageSessionRecord) -> Result<Option<SessionId>, SessionStoreError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))?;
        let id = self.next_id();
        if guard.len() == self.capacity {
            guard.pop_front();
        }
        guard.push_back(StoredSession {
            id: id.clone(),
            record,
        });
        Ok(Some(id))
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredSession>, SessionStoreError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}
