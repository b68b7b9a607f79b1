use serde::{Deserialize, Serialize};

/// Phrases that force the critical tier, in tie-break order.
pub const CRITICAL_KEYWORDS: [&str; 10] = [
    "severe bleeding",
    "heavy bleeding",
    "unconscious",
    "chest pain",
    "choking",
    "severe burn",
    "deep wound",
    "amputation",
    "shock",
    "severe fracture",
];

/// Phrases that force at least the severe tier, in tie-break order.
pub const HIGH_KEYWORDS: [&str; 9] = [
    "bleeding",
    "open wound",
    "laceration",
    "deep cut",
    "puncture",
    "fracture",
    "dislocation",
    "severe swelling",
    "high fever",
];

pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Keyword tiers and the confidence margin applied by the rescoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    pub critical_keywords: Vec<String>,
    pub high_keywords: Vec<String>,
    pub low_confidence_threshold: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            critical_keywords: CRITICAL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            high_keywords: HIGH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl TriageConfig {
    /// Lowercases keywords and drops blank entries, preserving list order.
    pub(crate) fn normalized(mut self) -> Self {
        self.critical_keywords = normalize_keywords(self.critical_keywords);
        self.high_keywords = normalize_keywords(self.high_keywords);
        self
    }
}

fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}
