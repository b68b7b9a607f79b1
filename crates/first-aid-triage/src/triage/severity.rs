use serde::{Deserialize, Serialize};

/// Severity tiers recognised by the triage pipeline, 1 (minor) through 5 (critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Minor,
    Moderate,
    ModerateSevere,
    Severe,
    Critical,
}

impl SeverityLevel {
    pub const MIN_SCORE: i32 = 1;
    pub const MAX_SCORE: i32 = 5;

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Minor,
            Self::Moderate,
            Self::ModerateSevere,
            Self::Severe,
            Self::Critical,
        ]
    }

    pub const fn from_score(score: i32) -> Option<Self> {
        match score {
            1 => Some(Self::Minor),
            2 => Some(Self::Moderate),
            3 => Some(Self::ModerateSevere),
            4 => Some(Self::Severe),
            5 => Some(Self::Critical),
            _ => None,
        }
    }

    pub const fn score(self) -> i32 {
        match self {
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::ModerateSevere => 3,
            Self::Severe => 4,
            Self::Critical => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::ModerateSevere => "Moderate-Severe",
            Self::Severe => "Severe",
            Self::Critical => "Critical",
        }
    }

    pub const fn urgency(self) -> UrgencyDescriptor {
        match self {
            Self::Minor => UrgencyDescriptor {
                icon: "✅",
                text: "Home care sufficient",
                color: "#34C759",
            },
            Self::Moderate => UrgencyDescriptor {
                icon: "⚠️",
                text: "See doctor within 24-48 hours",
                color: "#FFCC00",
            },
            Self::ModerateSevere => UrgencyDescriptor {
                icon: "⚠️",
                text: "Visit ER today",
                color: "#FF9500",
            },
            Self::Severe => UrgencyDescriptor {
                icon: "🚨",
                text: "ER urgent (next 1-2 hours)",
                color: "#FF6B35",
            },
            Self::Critical => UrgencyDescriptor {
                icon: "🚨",
                text: "Call 911 immediately",
                color: "#FF3B30",
            },
        }
    }
}

/// Presentation metadata for a severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrgencyDescriptor {
    pub icon: &'static str,
    pub text: &'static str,
    pub color: &'static str,
}

/// Display label for a severity score; anything outside 1-5 is "Unknown".
pub fn severity_label(severity: i32) -> &'static str {
    SeverityLevel::from_score(severity)
        .map(SeverityLevel::label)
        .unwrap_or("Unknown")
}

/// Urgency descriptor for a severity score.
///
/// Scores outside 1-5 get the moderate-severe entry rather than an unknown one.
pub fn urgency_for(severity: i32) -> UrgencyDescriptor {
    SeverityLevel::from_score(severity)
        .unwrap_or(SeverityLevel::ModerateSevere)
        .urgency()
}
