//! Telemetry for the filter service.
//!
//! Structured logging only; metrics and tracing exporters are the
//! surrounding platform's concern.

mod logging;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
