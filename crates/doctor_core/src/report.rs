//! The submitted problem description.

use serde::{Deserialize, Serialize};

/// One integration problem as entered by the user.
///
/// Every field is free text and may be empty; nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueReport {
    pub frontend_url: String,
    pub backend_url: String,
    /// React, Vue, Next.js, ... (open set)
    pub frontend_type: String,
    /// Express, FastAPI, Laravel, Django, ... (open set)
    pub backend_type: String,
    pub error_message: String,
}

impl IssueReport {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
            ..Default::default()
        }
    }

    pub fn with_frontend(mut self, url: impl Into<String>, kind: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self.frontend_type = kind.into();
        self
    }

    pub fn with_backend(mut self, url: impl Into<String>, kind: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self.backend_type = kind.into();
        self
    }
}
