//! Configuration for observability/telemetry

/// Default filter for an interactive terminal: keep stderr quiet.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for traces (e.g. "aspen-chat", "aspen-report")
    pub service_name: String,

    /// Service version (optional)
    pub service_version: Option<String>,

    /// OTLP endpoint for trace export (e.g., "http://localhost:4317")
    pub otlp_endpoint: Option<String>,

    /// Enable stderr log output
    pub enable_console: bool,

    /// Log level filter (e.g., "info", "aspen_runtime=debug")
    /// Defaults to "warn" if not set
    pub log_level: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "aspen".to_string(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
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

    /// Build from environment variables, keeping `service_name` as the default name.
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` → service_name
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `ASPEN_LOG` or `RUST_LOG` → log_level
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let service_name = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| service_name.into());

        // Only enable OTLP when explicitly set; otherwise console-only.
        let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let log_level = std::env::var("ASPEN_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .filter(|v| !v.trim().is_empty());

        Self {
            service_name,
            service_version: None,
            otlp_endpoint,
            enable_console: true,
            log_level,
        }
    }

    /// The filter directive actually applied.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
