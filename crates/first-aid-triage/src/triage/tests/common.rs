use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::triage::classification::RawClassification;
use crate::triage::engine::TriageEngine;
use crate::triage::service::TriageService;
use crate::triage::session::{
    InMemorySessionStore, SessionId, SessionStore, SessionStoreError, StoredSession,
    TriageSessionRecord,
};

pub(super) const NEUTRAL_DESCRIPTION: &str = "mild rash on forearm";

pub(super) fn scrape() -> RawClassification {
    RawClassification::new(1, "small scrape", "minor scrape on knee", 0.9)
        .with_steps(["Clean with water"])
}

pub(super) fn laceration() -> RawClassification {
    RawClassification::new(1, "Laceration", "deep cut on arm with bleeding", 0.8)
        .with_steps(Vec::<String>::new())
}

pub(super) fn unconscious_burn() -> RawClassification {
    RawClassification::new(2, "Burn", "patient unconscious with severe burn", 0.9)
}

pub(super) fn uncertain_bruise() -> RawClassification {
    RawClassification::new(1, "Bruise", "small bruise", 0.3)
}

pub(super) fn with_description(severity: i32, description: &str, confidence: f64) -> RawClassification {
    RawClassification::new(severity, "Injury", description, confidence)
}

pub(super) fn engine() -> TriageEngine {
    TriageEngine::standard()
}

pub(super) fn build_service() -> (TriageService<InMemorySessionStore>, Arc<InMemorySessionStore>) {
    let sessions = Arc::new(InMemorySessionStore::new("session", 50));
    let service = TriageService::new(engine(), sessions.clone());
    (service, sessions)
}

pub(super) struct UnavailableSessions;

impl SessionStore for UnavailableSessions {
    fn append(&self, _record: TriageSessionRecord) -> Result<Option<SessionId>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("document store offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<StoredSession>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("document store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
