//! Doctor Observability - tracing setup shared by the integration doctor crates
//!
//! # Features
//!
//! - Console logging to stderr with `EnvFilter`
//! - Optional OpenTelemetry export over OTLP
//! - Span macros for diagnosis requests and model calls
//!
//! # Quick Start
//!
//! ```no_run
//! use doctor_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("integration-doctor")
//!     .with_log_level("info");
//!
//! init(config)?;
//!
//! tracing::info!("Service started");
//! # Ok::<(), doctor_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use tracing::{record_duration, record_error};

// Macros are exported via #[macro_export]:
// doctor_observability::diagnosis_span!(), doctor_observability::model_call_span!()
