//! Mock implementations for testing.
//!
//! This module provides recording doubles for the sink ports, enabling
//! controlled testing of registry behavior. They are part of the public API
//! so downstream test suites can assert on deliveries the same way this
//! crate's own tests do.

pub mod sinks;

pub use sinks::{MockLogSink, MockWarningSink};
