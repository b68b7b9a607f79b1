//! Triage rescoring, first-aid planning, and session logging.
//!
//! Raw vision-model output enters through [`RawClassification`], is rescored
//! by the [`TriageEngine`], and leaves as a [`TriageReport`] assembled by the
//! [`TriageService`], which also hands a flattened record to a
//! [`SessionStore`].

pub mod classification;
pub mod engine;
pub mod router;
pub mod service;
pub mod session;
pub mod severity;

#[cfg(test)]
mod tests;

pub use classification::{ClassificationError, RawClassification, Recommendation};
pub use engine::{
    build_plan, care_actions, CareAction, Escalation, FirstAidPlan, TriageAssessment,
    TriageConfig, TriageEngine,
};
pub use router::triage_router;
pub use service::{TriageReport, TriageService};
pub use session::{
    InMemorySessionStore, NoopSessionStore, SessionId, SessionStore, SessionStoreError,
    StoredSession, TriageSessionRecord,
};
pub use severity::{severity_label, urgency_for, SeverityLevel, UrgencyDescriptor};
