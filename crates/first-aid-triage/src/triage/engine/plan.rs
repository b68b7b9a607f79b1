use crate::triage::severity::SeverityLevel;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CALL_EMERGENCY_DIRECTIVE: &str = "🚨 CALL 911 IMMEDIATELY";
pub const EMERGENCY_ROOM_DIRECTIVE: &str = "⚠️ Go to nearest Emergency Room";
pub const DOCTOR_DIRECTIVE: &str = "Visit a doctor within 24 hours";
pub const MONITOR_DIRECTIVE: &str = "Monitor the injury";
pub const KEEP_CALM_STEP: &str = "Keep victim calm and still";

/// Ordered first-aid instructions. Index 0 is always the severity directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FirstAidPlan {
    steps: Vec<String>,
}

impl FirstAidPlan {
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn directive(&self) -> &str {
        self.steps.first().map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}

/// Follow-up actions offered next to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareAction {
    CallEmergencyServices,
    FindNearestEr,
}

impl CareAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CallEmergencyServices => "🚨 CALL 911",
            Self::FindNearestEr => "🏥 Find Nearest ER",
        }
    }
}

fn directive_for(final_severity: i32) -> &'static str {
    if final_severity >= SeverityLevel::Critical.score() {
        CALL_EMERGENCY_DIRECTIVE
    } else if final_severity >= SeverityLevel::Severe.score() {
        EMERGENCY_ROOM_DIRECTIVE
    } else if final_severity >= SeverityLevel::ModerateSevere.score() {
        DOCTOR_DIRECTIVE
    } else {
        MONITOR_DIRECTIVE
    }
}

/// Prepends the severity directive to the classifier's steps.
///
/// Critical plans also end with [`KEEP_CALM_STEP`]. Absent steps are treated
/// as an empty list.
pub fn build_plan(
    injury_type: &str,
    final_severity: i32,
    raw_steps: Option<&[String]>,
) -> FirstAidPlan {
    let raw_steps = raw_steps.unwrap_or_default();
    let mut steps = Vec::with_capacity(raw_steps.len() + 2);
    steps.push(directive_for(final_severity).to_string());
    steps.extend(raw_steps.iter().cloned());
    if final_severity >= SeverityLevel::Critical.score() {
        steps.push(KEEP_CALM_STEP.to_string());
    }

    debug!(injury_type, final_severity, steps = steps.len(), "built first-aid plan");
    FirstAidPlan { steps }
}

pub fn care_actions(final_severity: i32) -> Vec<CareAction> {
    if final_severity >= SeverityLevel::Critical.score() {
        vec![CareAction::CallEmergencyServices, CareAction::FindNearestEr]
    } else if final_severity >= SeverityLevel::ModerateSevere.score() {
        vec![CareAction::FindNearestEr]
    } else {
        Vec::new()
    }
}
