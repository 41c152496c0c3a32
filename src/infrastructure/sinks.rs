//! Production sink adapters.

use std::io::Write;

use crate::application::ports::{DeprecationSeverity, LogSink, SinkError, WarningSink};
use crate::domain::notice::NoticeFields;

/// Structured-log backend over the `tracing` ecosystem.
///
/// Emits each notice as a `WARN` event with the `deprecations` target and
/// the notice fields attached, so any installed subscriber (fmt, JSON,
/// OpenTelemetry) picks them up as structured data.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    /// Create a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn notice(&self, message: &str, fields: &NoticeFields) {
        tracing::warn!(
            target: "deprecations",
            file = %fields.file,
            line = fields.line,
            package = %fields.package,
            link = %fields.link,
            since = fields.since.as_deref(),
            "{}",
            message
        );
    }
}

/// Process-level warning backend writing `Deprecated: ...` lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrWarningSink;

impl StderrWarningSink {
    /// Create a new stderr sink.
    pub fn new() -> Self {
        Self
    }
}

impl WarningSink for StderrWarningSink {
    fn emit(&self, message: &str, _severity: DeprecationSeverity) -> Result<(), SinkError> {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle, "Deprecated: {message}").map_err(SinkError::Io)
    }
}
