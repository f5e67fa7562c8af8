//! Configuration for observability/telemetry

use serde::{Deserialize, Serialize};

const DEFAULT_SERVICE_NAME: &str = "integration-doctor";

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_console() -> bool {
    true
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name for traces (e.g., "integration-doctor")
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version (optional, defaults to "unknown")
    #[serde(default)]
    pub service_version: Option<String>,

    /// OTLP endpoint for trace export (e.g., "http://localhost:4317")
    #[serde(default)]
    pub otlp_endpoint: Option<String>,

    /// Enable console/log output (stderr) in addition to OTLP export
    #[serde(default = "default_console")]
    pub enable_console: bool,

    /// Log level filter (e.g., "info", "debug", "doctor_core=trace")
    /// Defaults to `RUST_LOG`, then "info"
    #[serde(default)]
    pub log_level: Option<String>,

    /// Additional resource attributes (key-value pairs)
    #[serde(default)]
    pub resource_attributes: Vec<(String, String)>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
            resource_attributes: Vec::new(),
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Set OTLP endpoint
    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Add resource attribute
    pub fn with_resource_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.resource_attributes.push((key.into(), value.into()));
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` or `SERVICE_NAME` → service_name
    /// - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` → service_version
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `OTEL_LOG_LEVEL` or `RUST_LOG` → log_level
    pub fn from_env() -> Self {
        let service_name = std::env::var("OTEL_SERVICE_NAME")
            .or_else(|_| std::env::var("SERVICE_NAME"))
            .unwrap_or_else(|_| default_service_name());

        let service_version = std::env::var("OTEL_SERVICE_VERSION")
            .or_else(|_| std::env::var("SERVICE_VERSION"))
            .ok();

        // Only enable OTLP when explicitly set; otherwise console-only.
        let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|e| !e.trim().is_empty());

        let log_level = std::env::var("OTEL_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();

        Self {
            service_name,
            service_version,
            otlp_endpoint,
            enable_console: true,
            log_level,
            resource_attributes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("doctor-cli")
            .with_version("0.1.0")
            .with_log_level("debug")
            .with_console(false)
            .with_resource_attribute("deployment.environment", "test");

        assert_eq!(config.service_name, "doctor-cli");
        assert_eq!(config.service_version.as_deref(), Some("0.1.0"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(!config.enable_console);
        assert_eq!(config.resource_attributes.len(), 1);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ObservabilityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.service_name, "integration-doctor");
        assert!(config.enable_console);
        assert!(config.resource_attributes.is_empty());
    }
}
