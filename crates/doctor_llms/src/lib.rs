//! doctor_llms: the model capability behind the integration doctor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          DiagnosisOrchestrator               │
//! │        (doctor-core, Arc<dyn Provider>)      │
//! └──────────────────────┬───────────────────────┘
//!                        │ GenerateRequest
//!                        ▼
//!               ┌─────────────────┐
//!               │ OpenAIProvider  │──► POST {base_url}/chat/completions
//!               └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use doctor_llms::{GenerateRequest, Message, OpenAIProvider, Provider, ResponseFormat};
//!
//! # async fn run() -> doctor_llms::Result<()> {
//! let provider = OpenAIProvider::from_env()?;
//! let request = GenerateRequest::new(
//!     "gpt-4o-mini",
//!     vec![Message::system("Reply in JSON."), Message::user("{\"ping\": true}")],
//! )
//! .with_temperature(0.2)
//! .with_response_format(ResponseFormat::JsonObject);
//! let response = provider.generate(request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;


pub use error::{Error, Result};
pub use provider::Provider;

pub use providers::OpenAIProvider;
pub use providers::openai::OpenAIConfig;

pub use types::{
    GenerateOptions, GenerateRequest, GenerateResponse, Headers, Message, ResponseFormat, Role,
    Usage,
};
