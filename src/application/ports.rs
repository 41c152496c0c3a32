//! Ports (interfaces) for the application layer.
//!
//! The registry delivers notices through these ports; infrastructure
//! provides the concrete adapters (`TracingLogSink`, `StderrWarningSink`)
//! and the mocks used in tests.

use std::error::Error;
use std::fmt::{self, Debug};

use crate::domain::notice::NoticeFields;

/// Severity passed to the warning sink alongside each message.
///
/// `SuppressedWarning` is emitted when the suppressed warning backend is
/// active; the registry additionally guarantees that a sink error in that
/// mode never escalates anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeprecationSeverity {
    /// Regular deprecation warning.
    Warning,
    /// Best-effort warning whose delivery failures are discarded.
    SuppressedWarning,
}

/// Error returned by a warning sink that failed to deliver.
#[derive(Debug)]
pub enum SinkError {
    /// The underlying writer failed.
    Io(std::io::Error),
    /// The sink refused the message (used by test doubles and custom sinks).
    Rejected(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "warning sink I/O failure: {e}"),
            SinkError::Rejected(reason) => {
                write!(f, "warning sink rejected the message: {reason}")
            }
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            SinkError::Rejected(_) => None,
        }
    }
}

/// Port for the structured-log backend.
///
/// Receives the rendered message plus the named fields of the notice. Sinks
/// are not expected to fail in normal operation; a sink that does fail
/// handles that internally.
pub trait LogSink: Send + Sync + Debug {
    /// Emit one deprecation notice at notice/warning severity.
    fn notice(&self, message: &str, fields: &NoticeFields);
}

/// Port for the process-level warning backend.
///
/// Delivery is fallible; the registry decides per backend mode whether a
/// failure is reported or explicitly discarded.
pub trait WarningSink: Send + Sync + Debug {
    /// Emit one warning line.
    fn emit(&self, message: &str, severity: DeprecationSeverity) -> Result<(), SinkError>;
}
