//! OpenAI provider implementation

use async_trait::async_trait;
use reqwest::Client;

use super::convert::{error_message, from_openai_response, to_openai_request};
use super::types::{OpenAIConfig, OpenAIResponse};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// OpenAI provider
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Environment variable for API key
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";

    /// Environment variable for an alternative (OpenAI-compatible) endpoint
    pub const BASE_URL_ENV: &'static str = "OPENAI_BASE_URL";

    /// Create a new OpenAI provider
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    /// Create a provider around an existing client (shared pools, custom timeouts).
    pub fn with_client(config: OpenAIConfig, client: Client) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("openai".to_string()));
        }

        Ok(Self { config, client })
    }

    /// Create provider from environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("openai".to_string()))?;

        let mut config = OpenAIConfig::new(api_key);
        if let Ok(base_url) = std::env::var(Self::BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url);
            }
        }

        Self::new(config)
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();

        headers.insert("Authorization", format!("Bearer {}", self.config.api_key));
        headers.insert("Content-Type", "application/json");

        if let Some(ref org_id) = self.config.organization_id {
            headers.insert("OpenAI-Organization", org_id);
        }

        if let Some(ref project_id) = self.config.project_id {
            headers.insert("OpenAI-Project", project_id);
        }

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let openai_req = to_openai_request(&request)?;

        let headers = self
            .build_headers(request.options.headers.as_ref())
            .to_reqwest_headers()?;

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "openai chat completion"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&openai_req)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::api("OpenAI", status.as_u16(), error_message(&error_text)));
        }

        let openai_resp: OpenAIResponse = response.json().await?;
        tracing::debug!(id = %openai_resp.id, "openai response received");
        from_openai_response(openai_resp)
    }
}
