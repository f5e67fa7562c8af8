//! The normalized result handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::verdict::{RuleVerdict, Side};

/// Which path produced a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisSource {
    /// Parsed from a model response
    Model,
    /// No credential configured; the model was never called
    MissingCredential,
    /// The model call or its output failed
    Fallback,
}

impl DiagnosisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosisSource::Model => "model",
            DiagnosisSource::MissingCredential => "missing_credential",
            DiagnosisSource::Fallback => "fallback",
        }
    }
}

/// A complete, renderable diagnosis. Every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub side: Side,
    pub issue_title: String,
    pub summary: String,
    pub steps: Vec<String>,
    pub backend_code: String,
    pub frontend_code: String,
    pub extra_notes: String,
    /// Rule verdict the side was reconciled against
    pub rule_side: RuleVerdict,
    pub source: DiagnosisSource,
}

impl Diagnosis {
    pub fn is_fallback(&self) -> bool {
        self.source != DiagnosisSource::Model
    }

    /// Clear the snippet the side does not allow. `both` keeps whatever it has.
    pub(crate) fn gate_code(mut self) -> Self {
        if !self.side.allows_backend_code() {
            self.backend_code.clear();
        }
        if !self.side.allows_frontend_code() {
            self.frontend_code.clear();
        }
        self
    }
}

/// Decide the final side.
///
/// A decisive rule verdict always wins. Otherwise the model's side is kept
/// when valid, and `backend` is the default.
pub fn reconcile(model_side: Option<Side>, rule: RuleVerdict) -> Side {
    rule.decisive().or(model_side).unwrap_or(Side::Backend)
}
