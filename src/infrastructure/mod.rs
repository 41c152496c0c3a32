//! Infrastructure layer - backend adapters.
//!
//! This layer provides the concrete sinks behind the application ports:
//! - `TracingLogSink` for the structured-log backend
//! - `StderrWarningSink` for the process-level warning backend
//! - recording mocks for tests

pub mod mocks;
pub mod sinks;
