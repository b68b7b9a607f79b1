//! Boundary model for the vision classifier's output.
//!
//! The classifier is an external model whose JSON is untrusted: any field may
//! be missing, null, mistyped, or out of range. Every field has a defined
//! fallback so that scoring is total over whatever arrives.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN_INJURY: &str = "Unknown Injury";
pub const FALLBACK_FIRST_AID_STEP: &str = "Consult a medical professional.";
pub const DEFAULT_URGENCY_MESSAGE: &str = "Check details below";
pub const DEFAULT_DISCLAIMER: &str =
    "AI analysis can be wrong. Always seek professional help for emergencies.";

/// Care recommendation emitted alongside the classifier's severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "HOME_CARE")]
    HomeCare,
    #[default]
    #[serde(rename = "DOCTOR")]
    Doctor,
    #[serde(rename = "ER")]
    EmergencyRoom,
    #[serde(rename = "911")]
    EmergencyServices,
}

impl Recommendation {
    /// Unknown values fall back to [`Recommendation::Doctor`].
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "HOME_CARE" => Self::HomeCare,
            "ER" => Self::EmergencyRoom,
            "911" => Self::EmergencyServices,
            _ => Self::Doctor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HomeCare => "Home care",
            Self::Doctor => "See a doctor",
            Self::EmergencyRoom => "Emergency room",
            Self::EmergencyServices => "Call emergency services",
        }
    }
}

/// Raw classification as produced by the vision model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassification {
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: f64,
    /// `None` when the classifier sent no steps at all; an empty list is kept as-is.
    #[serde(default, deserialize_with = "lenient_steps")]
    pub first_aid_steps: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub urgency_message: String,
    #[serde(default, deserialize_with = "lenient_recommendation")]
    pub recommendation: Recommendation,
    #[serde(default, deserialize_with = "lenient_steps")]
    pub red_flags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub disclaimer: String,
}

impl RawClassification {
    pub fn new(
        severity: i32,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            description: description.into(),
            confidence,
            ..Self::default()
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first_aid_steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    /// Parses the classifier's JSON document.
    ///
    /// Only a document that is not a JSON object is rejected; individual
    /// fields degrade to their fallbacks.
    pub fn from_json(text: &str) -> Result<Self, ClassificationError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ClassificationError> {
        if !value.is_object() {
            return Err(ClassificationError::Malformed(format!(
                "expected a JSON object, found {}",
                value_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn injury_type(&self) -> &str {
        if self.title.is_empty() {
            UNKNOWN_INJURY
        } else {
            &self.title
        }
    }

    /// NaN carries no information and is read as zero confidence.
    pub fn effective_confidence(&self) -> f64 {
        if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence
        }
    }

    pub fn resolved_steps(&self) -> Vec<String> {
        match &self.first_aid_steps {
            Some(steps) => steps.clone(),
            None => vec![FALLBACK_FIRST_AID_STEP.to_string()],
        }
    }

    pub fn urgency_message(&self) -> &str {
        if self.urgency_message.is_empty() {
            DEFAULT_URGENCY_MESSAGE
        } else {
            &self.urgency_message
        }
    }

    pub fn disclaimer(&self) -> &str {
        if self.disclaimer.is_empty() {
            DEFAULT_DISCLAIMER
        } else {
            &self.disclaimer
        }
    }

    pub fn red_flags(&self) -> &[String] {
        self.red_flags.as_deref().unwrap_or(&[])
    }
}

/// Error raised when the classifier output cannot be read at all.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("malformed classifier output: {0}")]
    Malformed(String),
    #[error("invalid classifier JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_severity<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(int) = value.as_i64() {
        return Ok(int.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    }
    // `as` saturates and maps NaN to 0.
    Ok(number_from_value(&value)
        .map(|number| number.trunc() as i32)
        .unwrap_or(0))
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value)
        .filter(|number| !number.is_nan())
        .unwrap_or(0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

fn lenient_steps<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(text) => Some(vec![text]),
        _ => None,
    })
}

fn lenient_recommendation<'de, D>(deserializer: D) -> Result<Recommendation, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Recommendation::from_wire(&text),
        Value::Number(number) => Recommendation::from_wire(&number.to_string()),
        _ => Recommendation::default(),
    })
}
