//! OpenTelemetry telemetry initialization for version 0.31.0
//!
//! Console logging goes to stderr so stdout stays clean for rendered
//! diagnoses; OTLP export is added when an endpoint is configured.

use once_cell::sync::OnceCell;
use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

// Store the tracer provider for proper shutdown
static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Initialize tracing with the given configuration
///
/// A failing OTLP exporter falls back to console-only with a warning.
/// Fails only when a global subscriber is already installed.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = config
        .log_level
        .as_ref()
        .map(|level| tracing_subscriber::EnvFilter::new(level.as_str()))
        .unwrap_or_else(|| {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        });

    let mut attributes = vec![KeyValue::new("service.name", config.service_name.clone())];

    if let Some(version) = &config.service_version {
        attributes.push(KeyValue::new("service.version", version.clone()));
    }

    for (key, value) in &config.resource_attributes {
        attributes.push(KeyValue::new(key.clone(), value.clone()));
    }

    // In 0.31, Resource constructors are private; ResourceBuilder is the public API
    let resource = Resource::builder().with_attributes(attributes).build();

    // Build layers first, then compose once to avoid type mismatch
    let fmt_layer = config
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let mut otlp_failure = None;
    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            match build_otlp_tracer_provider(&config.service_name, endpoint, resource) {
                Ok((tracer, provider)) => {
                    // Set as global provider BEFORE creating layer
                    global::set_tracer_provider(provider.clone());
                    let _ = TRACER_PROVIDER.set(provider);
                    Some(OpenTelemetryLayer::new(tracer))
                }
                Err(e) => {
                    otlp_failure = Some(e);
                    None
                }
            }
        }
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    match (&config.otlp_endpoint, otlp_failure) {
        (Some(endpoint), None) => tracing::debug!(
            service.name = %config.service_name,
            otlp.endpoint = %endpoint,
            "OTLP tracing enabled"
        ),
        (Some(endpoint), Some(e)) => tracing::warn!(
            service.name = %config.service_name,
            endpoint = %endpoint,
            error = %e,
            "Failed to initialize OTLP export, falling back to console-only tracing"
        ),
        (None, _) => tracing::debug!(
            service.name = %config.service_name,
            "Tracing initialized (console only, no OTLP endpoint configured)"
        ),
    }

    Ok(())
}

/// Build OTLP tracer provider for OpenTelemetry 0.31
fn build_otlp_tracer_provider(
    service_name: &str,
    endpoint: &str,
    resource: Resource,
) -> Result<(opentelemetry_sdk::trace::SdkTracer, SdkTracerProvider), ObservabilityError> {
    // Note: with_endpoint() requires String, not &str
    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.to_string())
        .build()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(service_name.to_string());

    Ok((tracer, provider))
}

/// Shutdown OpenTelemetry tracer provider
///
/// Call this before exit so batched spans are exported.
pub fn shutdown() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        let _ = provider.shutdown();
        tracing::debug!("OpenTelemetry tracer provider shut down");
    }
}

/// Initialize with default configuration from environment variables
pub fn init_from_env() -> Result<(), ObservabilityError> {
    init(ObservabilityConfig::from_env())
}
