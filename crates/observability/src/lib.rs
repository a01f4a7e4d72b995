//! Aspen observability: tracing setup shared by the chat client and the report tool.
//!
//! Console logs go to stderr so they never interleave with the conversation
//! on stdout. Spans are additionally exported over OTLP when an endpoint is
//! configured.
//!
//! # Quick Start
//!
//! ```no_run
//! use aspen_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("aspen-chat").with_log_level("debug");
//! init(config)?;
//!
//! tracing::info!("Service started");
//! # Ok::<(), aspen_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - Service name
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint; export is off when unset
//! - `ASPEN_LOG` or `RUST_LOG` - Log level filter (default `warn`)

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use tracing::{record_duration, record_error};
