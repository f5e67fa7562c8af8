//! Orchestrator behavior against a scripted provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use doctor_core::{
    DiagnosisOrchestrator, DiagnosisSource, DoctorSettings, IssueReport, RuleVerdict, Side,
};
use doctor_llms::{
    Error, GenerateRequest, GenerateResponse, Headers, Provider, ResponseFormat, Result,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

enum Script {
    Reply(String),
    Fail(fn() -> Error),
    Stall,
}

struct StubProvider {
    script: Script,
    configured: bool,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl StubProvider {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            configured: true,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn replying(body: &str) -> Arc<Self> {
        Self::new(Script::Reply(body.to_string()))
    }

    fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            script: Script::Reply("{}".to_string()),
            configured: false,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn provider_id(&self) -> &str {
        "stub"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        match &self.script {
            Script::Reply(body) => Ok(GenerateResponse {
                content: body.clone(),
                finish_reason: Some("stop".to_string()),
                usage: None,
                model: None,
            }),
            Script::Fail(make) => Err(make()),
            Script::Stall => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(GenerateResponse {
                    content: "{}".to_string(),
                    finish_reason: None,
                    usage: None,
                    model: None,
                })
            }
        }
    }
}

fn orchestrator(provider: Arc<StubProvider>) -> DiagnosisOrchestrator {
    DiagnosisOrchestrator::new(provider, DoctorSettings::default())
}

fn report(error: &str) -> IssueReport {
    IssueReport::new(error)
        .with_frontend("http://localhost:5173", "React")
        .with_backend("http://localhost:8000", "Express")
}

const FRONTEND_REPLY: &str = r#"{
    "side": "frontend",
    "issue_title": "Wrong route",
    "summary": "The client calls a path that does not exist",
    "steps": ["Fix the path"],
    "backend_code": "app.get('/users', handler)",
    "frontend_code": "fetch('/api/users')",
    "extra_notes": ""
}"#;

#[tokio::test]
async fn test_decisive_rule_overrides_model_side() {
    for (rule, expected) in [
        (RuleVerdict::Backend, Side::Backend),
        (RuleVerdict::Frontend, Side::Frontend),
        (RuleVerdict::Both, Side::Both),
    ] {
        let provider = StubProvider::replying(FRONTEND_REPLY);
        let d = orchestrator(provider.clone())
            .diagnose(&report("whatever"), rule)
            .await;
        assert_eq!(d.side, expected);
        assert_eq!(d.rule_side, rule);
        assert_eq!(d.source, DiagnosisSource::Model);
        assert_eq!(provider.calls(), 1);
    }
}

#[tokio::test]
async fn test_override_gates_code_to_rule_side() {
    let provider = StubProvider::replying(FRONTEND_REPLY);
    let d = orchestrator(provider)
        .diagnose(&report("CORS blocked"), RuleVerdict::Backend)
        .await;
    assert_eq!(d.side, Side::Backend);
    assert_eq!(d.backend_code, "app.get('/users', handler)");
    assert!(d.frontend_code.is_empty());
}

#[tokio::test]
async fn test_uncertain_keeps_model_side() {
    let provider = StubProvider::replying(FRONTEND_REPLY);
    let d = orchestrator(provider)
        .diagnose(&report("Failed to fetch"), RuleVerdict::Uncertain)
        .await;
    assert_eq!(d.side, Side::Frontend);
    assert_eq!(d.issue_title, "Wrong route");
    assert!(d.backend_code.is_empty());
}

#[tokio::test]
async fn test_invalid_model_side_defaults_to_backend() {
    let provider = StubProvider::replying(r#"{"side": "database", "summary": "s"}"#);
    let d = orchestrator(provider)
        .diagnose(&report("Failed to fetch"), RuleVerdict::Uncertain)
        .await;
    assert_eq!(d.side, Side::Backend);
    assert_eq!(d.source, DiagnosisSource::Model);
}

#[tokio::test]
async fn test_missing_fields_are_defaulted() {
    let provider = StubProvider::replying(r#"{"side": "both"}"#);
    let d = orchestrator(provider)
        .diagnose(&report("x"), RuleVerdict::Uncertain)
        .await;
    assert_eq!(d.side, Side::Both);
    assert!(d.issue_title.is_empty());
    assert!(d.summary.is_empty());
    assert!(d.steps.is_empty());
    assert!(d.backend_code.is_empty());
    assert!(d.frontend_code.is_empty());
    assert!(d.extra_notes.is_empty());
}

#[tokio::test]
async fn test_request_uses_json_mode_and_settings() {
    let provider = StubProvider::replying(FRONTEND_REPLY);
    let settings = DoctorSettings::default()
        .with_model("gpt-4o")
        .with_temperature(0.1)
        .with_max_tokens(900);
    DiagnosisOrchestrator::new(provider.clone(), settings)
        .diagnose(&report("404 Not Found"), RuleVerdict::Frontend)
        .await;

    let request = provider.last_request.lock().unwrap().take().unwrap();
    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.options.temperature, Some(0.1));
    assert_eq!(request.options.max_tokens, Some(900));
    assert_eq!(request.options.response_format, ResponseFormat::JsonObject);
    assert_eq!(request.messages.len(), 2);
    assert!(request.messages[1].content.contains("FIXED"));
}

#[tokio::test]
async fn test_no_provider_short_circuits() {
    let d = DiagnosisOrchestrator::unconfigured(DoctorSettings::default())
        .diagnose(&report("404 Not Found"), RuleVerdict::Frontend)
        .await;
    assert_eq!(d.side, Side::Backend);
    assert_eq!(d.source, DiagnosisSource::MissingCredential);
    assert!(!d.steps.is_empty());
}

#[tokio::test]
async fn test_unconfigured_provider_is_never_called() {
    let provider = StubProvider::unconfigured();
    let orchestrator = orchestrator(provider.clone());
    assert!(!orchestrator.has_credential());

    let d = tokio::time::timeout(
        Duration::from_secs(1),
        orchestrator.diagnose(&report("CORS"), RuleVerdict::Backend),
    )
    .await
    .expect("short-circuit should return promptly");

    assert_eq!(d.side, Side::Backend);
    assert_eq!(d.source, DiagnosisSource::MissingCredential);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_yields_populated_fallback() {
    let failures: [fn() -> Error; 4] = [
        || Error::api("OpenAI", 401, "Incorrect API key provided"),
        || Error::api("OpenAI", 429, "Rate limit reached for gpt-4o-mini"),
        || Error::invalid_response("model returned no choices"),
        || Error::Other("connection reset by peer".to_string()),
    ];
    for make in failures {
        let raw = make().to_string();
        let provider = StubProvider::new(Script::Fail(make));
        let d = orchestrator(provider.clone())
            .diagnose(&report("CORS"), RuleVerdict::Frontend)
            .await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(d.side, Side::Backend);
        assert_eq!(d.source, DiagnosisSource::Fallback);
        assert_eq!(d.rule_side, RuleVerdict::Frontend);
        assert!(!d.issue_title.is_empty());
        assert!(!d.summary.is_empty());
        assert!(!d.steps.is_empty());
        assert!(d.backend_code.contains(&raw), "{} not in {}", raw, d.backend_code);
    }
}

#[tokio::test]
async fn test_malformed_output_yields_fallback() {
    let provider = StubProvider::replying("Sorry, I can't help with that.");
    let d = orchestrator(provider)
        .diagnose(&report("x"), RuleVerdict::Uncertain)
        .await;
    assert_eq!(d.source, DiagnosisSource::Fallback);
    assert_eq!(d.side, Side::Backend);
    assert!(d.backend_code.contains("Malformed model response"));
}

/// Collects the name of the span each WARN event fired in.
#[derive(Clone, Default)]
struct WarnSpans(Arc<Mutex<Vec<String>>>);

impl<S> Layer<S> for WarnSpans
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let span = ctx
            .event_span(event)
            .map(|span| span.name().to_string())
            .unwrap_or_default();
        self.0.lock().unwrap().push(span);
    }
}

#[tokio::test]
async fn test_failure_is_recorded_once_on_model_span() {
    let providers = [
        StubProvider::new(Script::Fail(|| Error::api("OpenAI", 500, "boom"))),
        StubProvider::replying("no json here"),
    ];
    for provider in providers {
        let warnings = WarnSpans::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let d = orchestrator(provider)
            .diagnose(&report("x"), RuleVerdict::Uncertain)
            .await;

        assert_eq!(d.source, DiagnosisSource::Fallback);
        assert_eq!(*warnings.0.lock().unwrap(), vec!["model.call".to_string()]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_yields_fallback() {
    let provider = StubProvider::new(Script::Stall);
    let settings = DoctorSettings::default().with_timeout_secs(2);
    let d = DiagnosisOrchestrator::new(provider.clone(), settings)
        .diagnose(&report("x"), RuleVerdict::Uncertain)
        .await;
    assert_eq!(provider.calls(), 1);
    assert_eq!(d.source, DiagnosisSource::Fallback);
    assert!(d.backend_code.contains("timed out after 2s"));
}

#[tokio::test]
async fn test_idempotent_with_deterministic_stub() {
    let provider = StubProvider::replying(FRONTEND_REPLY);
    let orchestrator = orchestrator(provider.clone());
    let input = report("Failed to fetch");
    let first = orchestrator.diagnose(&input, RuleVerdict::Uncertain).await;
    let second = orchestrator.diagnose(&input, RuleVerdict::Uncertain).await;
    assert_eq!(first, second);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_analyze_classifies_first() {
    let provider = StubProvider::replying(FRONTEND_REPLY);
    let d = orchestrator(provider)
        .analyze(&report("CORS error: Access-Control-Allow-Origin missing"))
        .await;
    assert_eq!(d.rule_side, RuleVerdict::Backend);
    assert_eq!(d.side, Side::Backend);
}
