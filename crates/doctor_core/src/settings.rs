//! Model call settings for the diagnosis pipeline

use std::str::FromStr;
use std::time::Duration;

use crate::error::{DoctorError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the single model call made per diagnosis
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorSettings {
    /// Model name sent to the provider
    pub model: String,
    /// Sampling temperature; kept low for repeatable diagnoses
    pub temperature: f32,
    /// Upper bound on the model call before falling back
    pub timeout_secs: u64,
    /// Maximum tokens for the response (provider default when None)
    pub max_tokens: Option<u32>,
}

impl Default for DoctorSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tokens: None,
        }
    }
}

impl DoctorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load settings from `DOCTOR_*` environment variables.
    ///
    /// Unset or blank variables keep their defaults; a value that does not
    /// parse is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(model) = non_blank(lookup("DOCTOR_MODEL")) {
            settings.model = model;
        }
        if let Some(raw) = non_blank(lookup("DOCTOR_TEMPERATURE")) {
            let temperature: f32 = parse_var("DOCTOR_TEMPERATURE", &raw)?;
            if !(0.0..=2.0).contains(&temperature) {
                return Err(DoctorError::Config(format!(
                    "DOCTOR_TEMPERATURE must be between 0 and 2, got {}",
                    temperature
                )));
            }
            settings.temperature = temperature;
        }
        if let Some(raw) = non_blank(lookup("DOCTOR_TIMEOUT_SECS")) {
            let secs: u64 = parse_var("DOCTOR_TIMEOUT_SECS", &raw)?;
            if secs == 0 {
                return Err(DoctorError::Config(
                    "DOCTOR_TIMEOUT_SECS must be greater than 0".into(),
                ));
            }
            settings.timeout_secs = secs;
        }
        if let Some(raw) = non_blank(lookup("DOCTOR_MAX_TOKENS")) {
            settings.max_tokens = Some(parse_var("DOCTOR_MAX_TOKENS", &raw)?);
        }

        Ok(settings)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| DoctorError::Config(format!("invalid value for {}: {:?}", key, raw)))
}
