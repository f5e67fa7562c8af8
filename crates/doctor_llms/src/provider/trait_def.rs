use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A hosted model that turns a prompt into text.
///
/// Implementations hold no per-request state and are shared across
/// concurrent requests behind an `Arc<dyn Provider>`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier ("openai", ...)
    fn provider_id(&self) -> &str;

    /// Whether a credential is present. Callers skip `generate` when this is false.
    fn is_configured(&self) -> bool {
        true
    }

    /// Headers sent with every request, with `custom_headers` merged on top.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Run a single non-streaming completion.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
