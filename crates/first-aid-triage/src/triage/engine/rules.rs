use super::config::TriageConfig;
use crate::triage::severity::SeverityLevel;
use serde::{Deserialize, Serialize};

/// A rule that raised, or attempted to raise, the severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Escalation {
    CriticalKeyword { keyword: String },
    HighSeverityKeyword { keyword: String },
    LowConfidence { threshold: f64 },
}

impl Escalation {
    pub fn reason(&self) -> String {
        match self {
            Escalation::CriticalKeyword { keyword } => format!("Critical keyword: \"{keyword}\""),
            Escalation::HighSeverityKeyword { keyword } => {
                format!("High-severity keyword: \"{keyword}\"")
            }
            Escalation::LowConfidence { .. } => "Low confidence score".to_string(),
        }
    }

    pub fn is_keyword(&self) -> bool {
        !matches!(self, Escalation::LowConfidence { .. })
    }
}

pub(crate) struct RuleOutcome {
    pub severity: i32,
    pub escalated: bool,
    pub escalations: Vec<Escalation>,
    pub penalty_applied: bool,
}

pub(crate) fn first_match<'a>(corpus: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .find(|keyword| corpus.contains(keyword.as_str()))
        .map(String::as_str)
}

/// Runs the keyword tiers and the confidence margin over the raw severity.
///
/// Only the first match in a tier counts. The high tier is consulted only when
/// the critical tier did not escalate. The confidence margin bumps severity
/// without marking the assessment as escalated.
pub(crate) fn apply_rules(
    severity: i32,
    corpus: &str,
    confidence: f64,
    config: &TriageConfig,
) -> RuleOutcome {
    let critical = SeverityLevel::Critical.score();
    let severe = SeverityLevel::Severe.score();

    let mut severity = severity;
    let mut escalated = false;
    let mut escalations = Vec::new();

    if let Some(keyword) = first_match(corpus, &config.critical_keywords) {
        if severity < critical {
            severity = critical;
            escalated = true;
            escalations.push(Escalation::CriticalKeyword {
                keyword: keyword.to_string(),
            });
        }
    }

    if !escalated {
        if let Some(keyword) = first_match(corpus, &config.high_keywords) {
            if severity < severe {
                severity = severe;
                escalated = true;
                escalations.push(Escalation::HighSeverityKeyword {
                    keyword: keyword.to_string(),
                });
            }
        }
    }

    let penalty_applied = confidence < config.low_confidence_threshold;
    if penalty_applied {
        severity = severity.saturating_add(1).min(critical);
        escalations.push(Escalation::LowConfidence {
            threshold: config.low_confidence_threshold,
        });
    }

    RuleOutcome {
        severity,
        escalated,
        escalations,
        penalty_applied,
    }
}
