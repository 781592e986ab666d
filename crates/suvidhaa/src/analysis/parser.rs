//! Tolerant interpretation of raw model output
//!
//! The completion service gives no structural guarantee, so every possible
//! output maps to a complete set of document fields.

use serde_json::{Map, Value};

use crate::types::DocumentAnalysis;

/// Characters of non-JSON output kept as the summary
const UNSTRUCTURED_SUMMARY_CHARS: usize = 500;

const SUMMARY_DEFAULT: &str = "Summary not available";
const PLAIN_LANGUAGE_DEFAULT: &str = "Plain language explanation not available";

/// One of the six fields the model is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisField {
    Summary,
    KeyPoints,
    AffectedGroups,
    KeyDates,
    ResponsibleOffices,
    PlainLanguage,
}

impl AnalysisField {
    pub const ALL: [AnalysisField; 6] = [
        Self::Summary,
        Self::KeyPoints,
        Self::AffectedGroups,
        Self::KeyDates,
        Self::ResponsibleOffices,
        Self::PlainLanguage,
    ];

    /// Key in the model's JSON object
    pub fn json_key(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::KeyPoints => "key_points",
            Self::AffectedGroups => "affected_groups",
            Self::KeyDates => "key_dates",
            Self::ResponsibleOffices => "responsible_offices",
            Self::PlainLanguage => "plain_language",
        }
    }
}

/// Result of document analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// JSON object with all six fields usable
    FullyStructured(DocumentAnalysis),
    /// JSON object where the listed fields fell back to defaults
    PartiallyStructured {
        analysis: DocumentAnalysis,
        defaulted: Vec<AnalysisField>,
    },
    /// Output was not valid JSON; fields derived from the raw text
    Unstructured(DocumentAnalysis),
    /// The completion call failed or returned JSON that is not an object
    Unavailable,
}

impl AnalysisOutcome {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FullyStructured(_) => "fully_structured",
            Self::PartiallyStructured { .. } => "partially_structured",
            Self::Unstructured(_) => "unstructured",
            Self::Unavailable => "unavailable",
        }
    }

    /// The complete field set to persist
    pub fn into_analysis(self) -> DocumentAnalysis {
        match self {
            Self::FullyStructured(analysis)
            | Self::PartiallyStructured { analysis, .. }
            | Self::Unstructured(analysis) => analysis,
            Self::Unavailable => unavailable_analysis(),
        }
    }
}

/// Interpret raw model output.
///
/// A JSON object is read field by field, each missing or unusable field
/// taking its own default. Text that is not JSON becomes the unstructured
/// set built from the raw output. Valid JSON of any other shape cannot be
/// read field by field and is treated as an unavailable analysis.
pub fn parse_model_output(raw: &str) -> AnalysisOutcome {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => from_object(&object),
        Ok(other) => {
            tracing::warn!("Model returned JSON {} instead of an object", json_shape(&other));
            AnalysisOutcome::Unavailable
        }
        Err(_) => AnalysisOutcome::Unstructured(unstructured_analysis(raw)),
    }
}

fn json_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn from_object(object: &Map<String, Value>) -> AnalysisOutcome {
    let mut defaulted = Vec::new();

    let mut text = |field: AnalysisField, default: &str| -> String {
        match object.get(field.json_key()).and_then(text_value) {
            Some(value) => value,
            None => {
                defaulted.push(field);
                default.to_string()
            }
        }
    };
    let summary_english = text(AnalysisField::Summary, SUMMARY_DEFAULT);
    let plain_language = text(AnalysisField::PlainLanguage, PLAIN_LANGUAGE_DEFAULT);

    let mut list = |field: AnalysisField| -> Vec<String> {
        match object.get(field.json_key()).and_then(list_value) {
            Some(values) => values,
            None => {
                defaulted.push(field);
                Vec::new()
            }
        }
    };
    let key_points = list(AnalysisField::KeyPoints);
    let affected_groups = list(AnalysisField::AffectedGroups);
    let key_dates = list(AnalysisField::KeyDates);
    let responsible_offices = list(AnalysisField::ResponsibleOffices);

    let analysis = DocumentAnalysis {
        summary_english,
        plain_language,
        key_points,
        affected_groups,
        key_dates,
        responsible_offices,
    };

    if defaulted.is_empty() {
        AnalysisOutcome::FullyStructured(analysis)
    } else {
        AnalysisOutcome::PartiallyStructured { analysis, defaulted }
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Arrays keep their order; non-string items are rendered as JSON and nulls
/// dropped. A bare string is treated as a one-item list.
fn list_value(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

fn unstructured_analysis(raw: &str) -> DocumentAnalysis {
    let summary_english = if raw.chars().count() > UNSTRUCTURED_SUMMARY_CHARS {
        let mut summary: String = raw.chars().take(UNSTRUCTURED_SUMMARY_CHARS).collect();
        summary.push_str("...");
        summary
    } else {
        raw.to_string()
    };

    DocumentAnalysis {
        summary_english,
        plain_language: "Please refer to the original document for detailed information.".to_string(),
        key_points: vec!["AI processing completed but structured data not available".to_string()],
        affected_groups: vec!["General public".to_string()],
        key_dates: Vec::new(),
        responsible_offices: vec!["To be determined".to_string()],
    }
}

fn unavailable_analysis() -> DocumentAnalysis {
    DocumentAnalysis {
        summary_english: "AI processing temporarily unavailable. Document uploaded successfully.".to_string(),
        plain_language: "AI analysis will be available shortly.".to_string(),
        key_points: vec!["Document requires manual review".to_string()],
        affected_groups: vec!["General public".to_string()],
        key_dates: Vec::new(),
        responsible_offices: vec!["To be determined".to_string()],
    }
}
