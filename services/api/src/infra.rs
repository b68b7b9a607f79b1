use first_aid_triage::config::SessionStoreConfig;
use first_aid_triage::error::AppError;
use first_aid_triage::triage::{
    InMemorySessionStore, NoopSessionStore, RawClassification, SessionId, SessionStore,
    SessionStoreError, StoredSession, TriageSessionRecord,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

const SESSION_CAPACITY: usize = 5_000;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session store chosen from configuration at startup.
#[derive(Debug, Clone)]
pub(crate) enum ConfiguredSessionStore {
    Disabled(NoopSessionStore),
    Memory(InMemorySessionStore),
}

impl ConfiguredSessionStore {
    pub(crate) fn from_config(config: &SessionStoreConfig) -> Self {
        match config {
            SessionStoreConfig::Disabled => {
                warn!("session store credentials missing; triage sessions will not be logged");
                Self::Disabled(NoopSessionStore)
            }
            SessionStoreConfig::Configured { project_id, .. } => {
                info!(%project_id, "logging triage sessions");
                Self::Memory(InMemorySessionStore::new(project_id.clone(), SESSION_CAPACITY))
            }
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

impl SessionStore for ConfiguredSessionStore {
    fn append(&self, record: TriageSessionRecord) -> Result<Option<SessionId>, SessionStoreError> {
        match self {
            Self::Disabled(store) => store.append(record),
            Self::Memory(store) => store.append(record),
        }
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredSession>, SessionStoreError> {
        match self {
            Self::Disabled(store) => store.recent(limit),
            Self::Memory(store) => store.recent(limit),
        }
    }
}

/// Reads classifier JSON from a file, or from stdin when `input` is `-`.
pub(crate) fn read_classification(input: &Path) -> Result<RawClassification, AppError> {
    let text = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };

    Ok(RawClassification::from_json(&text)?)
}
