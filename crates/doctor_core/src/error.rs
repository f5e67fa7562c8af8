//! Error types for the diagnosis pipeline

use thiserror::Error;

/// Failures inside the pipeline. The orchestrator turns every one of these
/// into a fallback diagnosis; they only escape from settings loading.
#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model call failed: {0}")]
    Provider(#[from] doctor_llms::Error),

    #[error("Model call timed out after {0}s")]
    Timeout(u64),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl DoctorError {
    /// The provider rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_auth())
    }

    /// The provider throttled the call or the account is out of quota.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_rate_limited())
    }
}

pub type Result<T> = std::result::Result<T, DoctorError>;
