mod config;
mod plan;
mod rules;

pub use config::{TriageConfig, CRITICAL_KEYWORDS, HIGH_KEYWORDS, LOW_CONFIDENCE_THRESHOLD};
pub use plan::{
    build_plan, care_actions, CareAction, FirstAidPlan, CALL_EMERGENCY_DIRECTIVE,
    DOCTOR_DIRECTIVE, EMERGENCY_ROOM_DIRECTIVE, KEEP_CALM_STEP, MONITOR_DIRECTIVE,
};
pub use rules::Escalation;

use super::classification::RawClassification;
use super::severity::{severity_label, SeverityLevel};
use rules::apply_rules;
use serde::{Deserialize, Serialize};

/// Stateless rescoring engine that corrects and escalates classifier output.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    config: TriageConfig,
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl TriageEngine {
    pub fn new(config: TriageConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn standard() -> Self {
        Self::new(TriageConfig::default())
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Rescores a raw classification.
    ///
    /// The rules run on the raw severity as received (missing is 0); only the
    /// final severity is clamped into 1-5.
    pub fn score(&self, raw: &RawClassification) -> TriageAssessment {
        let injury_type = raw.injury_type().to_string();
        let raw_severity = raw.severity;
        let confidence = raw.effective_confidence();

        let corpus = format!("{} {}", injury_type, raw.description).to_lowercase();
        let outcome = apply_rules(raw_severity, &corpus, confidence, &self.config);
        let final_severity = outcome
            .severity
            .clamp(SeverityLevel::MIN_SCORE, SeverityLevel::MAX_SCORE);

        let escalation_reason = outcome
            .escalations
            .iter()
            .map(Escalation::reason)
            .collect::<Vec<_>>()
            .join("; ");

        TriageAssessment {
            raw_severity,
            final_severity,
            escalated: outcome.escalated,
            escalation_reason,
            escalations: outcome.escalations,
            confidence_penalty_applied: outcome.penalty_applied,
            confidence_level: confidence_percent(confidence),
            severity_label: severity_label(final_severity).to_string(),
            injury_type,
        }
    }

    pub fn build_plan(
        &self,
        injury_type: &str,
        final_severity: i32,
        raw_steps: Option<&[String]>,
    ) -> FirstAidPlan {
        build_plan(injury_type, final_severity, raw_steps)
    }
}

// Ties round toward positive infinity; `as` saturates infinities.
fn confidence_percent(confidence: f64) -> i32 {
    (confidence * 100.0 + 0.5).floor() as i32
}

/// Canonical rescored record for a single analysis session.
///
/// `escalated` reflects keyword rules only. The low-confidence margin can
/// raise `final_severity` and extend `escalation_reason` while `escalated`
/// stays false; `confidence_penalty_applied` records that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageAssessment {
    pub raw_severity: i32,
    pub final_severity: i32,
    pub escalated: bool,
    pub escalation_reason: String,
    pub escalations: Vec<Escalation>,
    pub confidence_penalty_applied: bool,
    pub confidence_level: i32,
    pub injury_type: String,
    pub severity_label: String,
}

impl TriageAssessment {
    pub fn severity_level(&self) -> Option<SeverityLevel> {
        SeverityLevel::from_score(self.final_severity)
    }

    pub fn requires_emergency_services(&self) -> bool {
        self.final_severity >= SeverityLevel::Critical.score()
    }
}
