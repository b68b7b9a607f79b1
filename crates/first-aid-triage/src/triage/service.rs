use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::classification::{RawClassification, Recommendation};
use super::engine::{care_actions, CareAction, FirstAidPlan, TriageAssessment, TriageEngine};
use super::session::{
    SessionId, SessionStore, SessionStoreError, StoredSession, TriageSessionRecord,
};
use super::severity::{urgency_for, UrgencyDescriptor};

/// Everything the presentation layer needs for one finished analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageReport {
    pub assessment: TriageAssessment,
    pub first_aid_plan: FirstAidPlan,
    pub urgency: UrgencyDescriptor,
    pub care_actions: Vec<CareAction>,
    pub recommendation: Recommendation,
    pub urgency_message: String,
    pub red_flags: Vec<String>,
    pub disclaimer: String,
    pub session_id: Option<SessionId>,
}

/// Service composing the rescoring engine and the session store.
pub struct TriageService<S> {
    engine: Arc<TriageEngine>,
    sessions: Arc<S>,
}

impl<S> TriageService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(engine: TriageEngine, sessions: Arc<S>) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions,
        }
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    /// Rescores a classification and logs the session.
    ///
    /// Logging is best-effort: a store failure is reported through tracing and
    /// leaves `session_id` empty, the report is returned regardless.
    pub fn assess(&self, raw: &RawClassification, client_context: &str) -> TriageReport {
        let assessment = self.engine.score(raw);
        let steps = raw.resolved_steps();
        let first_aid_plan =
            self.engine
                .build_plan(raw.injury_type(), assessment.final_severity, Some(&steps));

        info!(
            injury_type = %assessment.injury_type,
            raw_severity = assessment.raw_severity,
            final_severity = assessment.final_severity,
            escalated = assessment.escalated,
            confidence = assessment.confidence_level,
            "triage assessment completed"
        );

        let record = TriageSessionRecord::from_assessment(&assessment, client_context, Utc::now());
        let session_id = self.log_session(record);

        TriageReport {
            urgency: urgency_for(assessment.final_severity),
            care_actions: care_actions(assessment.final_severity),
            recommendation: raw.recommendation,
            urgency_message: raw.urgency_message().to_string(),
            red_flags: raw.red_flags().to_vec(),
            disclaimer: raw.disclaimer().to_string(),
            first_aid_plan,
            assessment,
            session_id,
        }
    }

    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<StoredSession>, SessionStoreError> {
        self.sessions.recent(limit)
    }

    fn log_session(&self, record: TriageSessionRecord) -> Option<SessionId> {
        match self.sessions.append(record) {
            Ok(Some(id)) => {
                info!(session_id = %id, "triage session logged");
                Some(id)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "failed to log triage session");
                None
            }
        }
    }
}
