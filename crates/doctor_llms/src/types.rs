//! Provider-agnostic request/response types

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Requested shape of the model output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// A single JSON object (provider-enforced where supported)
    JsonObject,
}

/// Sampling and transport options for a generate call
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub response_format: ResponseFormat,
    /// Extra headers merged over the provider defaults
    pub headers: Option<Headers>,
}

/// Unified generate request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: GenerateOptions::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.options.response_format = format;
        self
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

/// Unified generate response
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Text content of the first choice
    pub content: String,
    /// Raw finish reason reported by the provider ("stop", "length", ...)
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
    /// Model that actually served the request
    pub model: Option<String>,
}

impl GenerateResponse {
    pub fn text(&self) -> &str {
        &self.content
    }

    /// Output was cut by the token limit.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("length")
    }
}

/// Ordered, case-preserving header set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Values from `other` win.
    pub fn merge_with(&mut self, other: &Headers) {
        for (k, v) in &other.inner {
            self.inner.insert(k.clone(), v.clone());
        }
    }

    /// Fails on the first name or value that cannot go on the wire. The
    /// error names the header only, never the value.
    pub fn to_reqwest_headers(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (k, v) in &self.inner {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| Error::InvalidHeader(k.clone()))?;
            let value = HeaderValue::from_str(v).map_err(|_| Error::InvalidHeader(k.clone()))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_headers() {
        let mut headers = Headers::new();
        headers.insert("Authorization", "Bearer sk-test");
        headers.insert("Content-Type", "application/json");

        let map = headers.to_reqwest_headers().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["authorization"], "Bearer sk-test");
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let mut headers = Headers::new();
        headers.insert("Authorization", "Bearer sk-te\nst");

        let err = headers.to_reqwest_headers().unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(ref name) if name == "Authorization"));
        assert!(!err.to_string().contains("sk-te"));
    }

    #[test]
    fn test_invalid_name_is_an_error() {
        let mut headers = Headers::new();
        headers.insert("Bad Header", "x");
        assert!(matches!(
            headers.to_reqwest_headers(),
            Err(Error::InvalidHeader(_))
        ));
    }
}
