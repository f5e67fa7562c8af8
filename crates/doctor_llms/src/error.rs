//! Error types for model providers

use thiserror::Error;

/// Errors raised while talking to a model provider.
#[derive(Error, Debug)]
pub enum Error {
    /// No credential configured for the provider
    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),

    /// Transport failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A header name or value cannot be sent (control characters in a key, ...)
    #[error("Invalid header '{0}': not a valid HTTP header name or value")]
    InvalidHeader(String),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status returned by the provider API
    #[error("{provider} API error {status}: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    /// The provider answered with something we cannot use
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn api(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// 401/403 from the provider.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }

    /// 429 from the provider (rate limit or exhausted quota).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { status: 429, .. })
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, Error>;
