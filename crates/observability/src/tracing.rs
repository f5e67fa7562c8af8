//! Utility functions for tracing

/// Create a span covering one diagnosis request
///
/// `rule.side`, `diagnosis.side`, `diagnosis.source` and `duration_ms` start
/// empty and are recorded once known.
///
/// # Example
///
/// ```rust
/// use doctor_observability::diagnosis_span;
///
/// let span = diagnosis_span!("3f2a9c1e");
/// let _guard = span.enter();
/// // ... classify, prompt, reconcile ...
/// ```
#[macro_export]
macro_rules! diagnosis_span {
    ($request_id:expr) => {
        tracing::info_span!(
            "diagnosis",
            request.id = $request_id,
            rule.side = tracing::field::Empty,
            diagnosis.side = tracing::field::Empty,
            diagnosis.source = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Create a span for an outbound model call
///
/// # Example
///
/// ```rust
/// use doctor_observability::model_call_span;
///
/// let span = model_call_span!("openai", "gpt-4o-mini");
/// let _guard = span.enter();
/// // ... provider.generate(...) ...
/// ```
#[macro_export]
macro_rules! model_call_span {
    ($provider:expr, $model:expr) => {
        tracing::info_span!(
            "model.call",
            model.provider = $provider,
            model.name = $model,
            model.duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span
///
/// Marks `error`/`error.message` (declared by `model_call_span!`) and
/// emits a warning event.
pub fn record_error<E: std::fmt::Display + ?Sized>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::warn!(error = %error, "Operation failed");
}

/// Record latency/duration in milliseconds on the current span
///
/// # Example
///
/// ```rust
/// use doctor_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// // ... operation ...
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
