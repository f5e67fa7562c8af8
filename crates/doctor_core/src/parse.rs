//! Total mapping from untrusted model output to typed fields.

use serde_json::{Map, Value};

use crate::diagnosis::{reconcile, Diagnosis, DiagnosisSource};
use crate::error::{DoctorError, Result};
use crate::verdict::{RuleVerdict, Side};

/// Model answer after validation. Absent or unusable fields are empty;
/// `side` is `None` unless the model sent one of the three valid values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub side: Option<Side>,
    pub issue_title: String,
    pub summary: String,
    pub steps: Vec<String>,
    pub backend_code: String,
    pub frontend_code: String,
    pub extra_notes: String,
}

impl ModelReply {
    /// Reconcile against the rule verdict and gate the code fields.
    pub fn into_diagnosis(self, rule: RuleVerdict) -> Diagnosis {
        Diagnosis {
            side: reconcile(self.side, rule),
            issue_title: self.issue_title,
            summary: self.summary,
            steps: self.steps,
            backend_code: self.backend_code,
            frontend_code: self.frontend_code,
            extra_notes: self.extra_notes,
            rule_side: rule,
            source: DiagnosisSource::Model,
        }
        .gate_code()
    }
}

/// Parse raw model text. Tolerates markdown code fences and stray prose
/// around the JSON object, braces in the prose included; fails only when no
/// JSON object can be read.
pub fn parse_model_output(raw: &str) -> Result<ModelReply> {
    find_json_object(raw).map(|map| from_object(&map))
}

/// First `{` position at which exactly one JSON object can be read.
/// Anything after the object is ignored.
fn find_json_object(raw: &str) -> Result<Map<String, Value>> {
    let mut first_error = None;

    for (start, _) in raw.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&raw[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(Value::Object(map))) => return Ok(map),
            Some(Err(e)) if first_error.is_none() => first_error = Some(e.to_string()),
            _ => {}
        }
    }

    Err(DoctorError::MalformedResponse(match first_error {
        Some(e) => format!("invalid JSON: {}", e),
        None => "no JSON object in model output".to_string(),
    }))
}

fn from_object(map: &Map<String, Value>) -> ModelReply {
    ModelReply {
        side: map
            .get("side")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        issue_title: text_field(map, "issue_title"),
        summary: text_field(map, "summary"),
        steps: steps_field(map),
        backend_code: text_field(map, "backend_code"),
        frontend_code: text_field(map, "frontend_code"),
        extra_notes: text_field(map, "extra_notes"),
    }
}

/// Strings pass through; an array of strings is joined by newlines
/// (models sometimes split code into lines); anything else is empty.
fn text_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// A list stays a list (non-string items are stringified, blanks dropped);
/// a single string becomes a one-step list.
fn steps_field(map: &Map<String, Value>) -> Vec<String> {
    match map.get("steps") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}
