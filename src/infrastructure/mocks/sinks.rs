//! Recording sink doubles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::application::ports::{DeprecationSeverity, LogSink, SinkError, WarningSink};
use crate::domain::notice::NoticeFields;

/// Log sink that records every notice it receives.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use deprecations::{DeprecationRegistry, MockLogSink};
///
/// let registry = DeprecationRegistry::new();
/// let sink = Arc::new(MockLogSink::new());
/// registry.enable_with_log_sink(sink.clone());
///
/// registry.trigger("acme/orm", "link", "old API", &[]);
///
/// assert_eq!(sink.notices().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockLogSink {
    notices: Mutex<Vec<(String, NoticeFields)>>,
}

impl MockLogSink {
    /// Create a new recording log sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notices as (message, fields) pairs, in delivery order.
    pub fn notices(&self) -> Vec<(String, NoticeFields)> {
        self.notices
            .lock()
            .expect("MockLogSink mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    /// Number of recorded notices.
    pub fn count(&self) -> usize {
        self.notices
            .lock()
            .expect("MockLogSink mutex poisoned - a test thread panicked while holding the lock")
            .len()
    }
}

impl LogSink for MockLogSink {
    fn notice(&self, message: &str, fields: &NoticeFields) {
        self.notices
            .lock()
            .expect("MockLogSink mutex poisoned - a test thread panicked while holding the lock")
            .push((message.to_owned(), fields.clone()));
    }
}

/// Warning sink that records messages and severities, with optional
/// failure injection.
#[derive(Debug, Default)]
pub struct MockWarningSink {
    emissions: Mutex<Vec<(String, DeprecationSeverity)>>,
    fail: AtomicBool,
}

impl MockWarningSink {
    /// Create a new recording warning sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent emission fail with a rejection error. Failed
    /// emissions are not recorded.
    pub fn fail_next_emissions(&self) {
        self.fail.store(true, Ordering::Release);
    }

    /// Recorded warning lines, in delivery order.
    pub fn messages(&self) -> Vec<String> {
        self.emissions
            .lock()
            .expect(
                "MockWarningSink mutex poisoned - a test thread panicked while holding the lock",
            )
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    /// Recorded severities, in delivery order.
    pub fn severities(&self) -> Vec<DeprecationSeverity> {
        self.emissions
            .lock()
            .expect(
                "MockWarningSink mutex poisoned - a test thread panicked while holding the lock",
            )
            .iter()
            .map(|(_, severity)| *severity)
            .collect()
    }
}

impl WarningSink for MockWarningSink {
    fn emit(&self, message: &str, severity: DeprecationSeverity) -> Result<(), SinkError> {
        if self.fail.load(Ordering::Acquire) {
            return Err(SinkError::Rejected("failure injected by test".to_owned()));
        }

        self.emissions
            .lock()
            .expect(
                "MockWarningSink mutex poisoned - a test thread panicked while holding the lock",
            )
            .push((message.to_owned(), severity));
        Ok(())
    }
}
