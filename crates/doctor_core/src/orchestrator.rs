//! Diagnosis orchestration: classify, prompt, call, parse, reconcile.

use std::sync::Arc;
use std::time::Instant;

use doctor_llms::{GenerateRequest, OpenAIProvider, Provider, ResponseFormat};
use doctor_observability::{diagnosis_span, model_call_span, record_duration, record_error};
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::classifier::RuleClassifier;
use crate::diagnosis::Diagnosis;
use crate::error::{DoctorError, Result};
use crate::fallback;
use crate::parse::{parse_model_output, ModelReply};
use crate::prompt::build_messages;
use crate::report::IssueReport;
use crate::settings::DoctorSettings;
use crate::verdict::RuleVerdict;

/// Turns an [`IssueReport`] into a [`Diagnosis`].
///
/// Holds no per-request state; one instance can serve concurrent requests.
pub struct DiagnosisOrchestrator {
    provider: Option<Arc<dyn Provider>>,
    settings: DoctorSettings,
    classifier: RuleClassifier,
}

impl DiagnosisOrchestrator {
    pub fn new(provider: Arc<dyn Provider>, settings: DoctorSettings) -> Self {
        Self {
            provider: Some(provider),
            settings,
            classifier: RuleClassifier::new(),
        }
    }

    /// No model available; every diagnosis takes the missing-credential path.
    pub fn unconfigured(settings: DoctorSettings) -> Self {
        Self {
            provider: None,
            settings,
            classifier: RuleClassifier::new(),
        }
    }

    /// Build with an OpenAI provider from `OPENAI_API_KEY`. A missing key
    /// yields an unconfigured orchestrator instead of an error.
    pub fn from_env(settings: DoctorSettings) -> Self {
        match OpenAIProvider::from_env() {
            Ok(provider) => Self::new(Arc::new(provider), settings),
            Err(e) => {
                info!(error = %e, "No model credential, running in rules-only mode");
                Self::unconfigured(settings)
            }
        }
    }

    pub fn settings(&self) -> &DoctorSettings {
        &self.settings
    }

    /// Whether a configured provider is attached.
    pub fn has_credential(&self) -> bool {
        self.configured_provider().is_some()
    }

    fn configured_provider(&self) -> Option<&Arc<dyn Provider>> {
        self.provider.as_ref().filter(|p| p.is_configured())
    }

    /// Classify the report, then diagnose it.
    pub async fn analyze(&self, report: &IssueReport) -> Diagnosis {
        let verdict = self.classifier.classify(report);
        self.diagnose(report, verdict).await
    }

    /// Produce a diagnosis for a report and its rule verdict.
    ///
    /// Never fails: a missing credential, transport error, timeout or
    /// malformed response each yield a complete fallback diagnosis.
    pub async fn diagnose(&self, report: &IssueReport, rule: RuleVerdict) -> Diagnosis {
        let request_id = Uuid::new_v4().to_string();
        let span = diagnosis_span!(request_id.as_str());
        span.record("rule.side", rule.as_str());

        async {
            let start = Instant::now();

            let diagnosis = match self.configured_provider() {
                None => {
                    info!("Model credential not configured, skipping model call");
                    fallback::missing_credential(rule)
                }
                Some(provider) => match self.ask_model(provider.as_ref(), report, rule).await {
                    Ok(reply) => reply.into_diagnosis(rule),
                    Err(e) => fallback::model_failure(rule, &e),
                },
            };

            let span = tracing::Span::current();
            span.record("diagnosis.side", diagnosis.side.as_str());
            span.record("diagnosis.source", diagnosis.source.as_str());
            record_duration("duration_ms", start.elapsed());
            info!(side = %diagnosis.side, rule_side = %rule, "Diagnosis complete");

            diagnosis
        }
        .instrument(span)
        .await
    }

    async fn ask_model(
        &self,
        provider: &dyn Provider,
        report: &IssueReport,
        rule: RuleVerdict,
    ) -> Result<ModelReply> {
        let mut request = GenerateRequest::new(&self.settings.model, build_messages(report, rule))
            .with_temperature(self.settings.temperature)
            .with_response_format(ResponseFormat::JsonObject);
        if let Some(max_tokens) = self.settings.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let span = model_call_span!(provider.provider_id(), self.settings.model.as_str());
        async {
            let start = Instant::now();
            let outcome = tokio::time::timeout(self.settings.timeout(), provider.generate(request)).await;
            record_duration("model.duration_ms", start.elapsed());

            // Failures are recorded on the model span only.
            let reply = match outcome {
                Ok(Ok(response)) => {
                    if response.is_truncated() {
                        warn!("Model output hit the token limit; parsing what was returned");
                    }
                    debug!(content = %response.text(), "Model response");
                    parse_model_output(response.text())
                }
                Ok(Err(e)) => Err(DoctorError::from(e)),
                Err(_) => Err(DoctorError::Timeout(self.settings.timeout_secs)),
            };
            if let Err(e) = &reply {
                record_error(e);
            }
            reply
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for DiagnosisOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosisOrchestrator")
            .field("provider", &self.provider.as_ref().map(|p| p.provider_id().to_string()))
            .field("settings", &self.settings)
            .finish()
    }
}
