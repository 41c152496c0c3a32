//! Test assertions over the registry's occurrence counters.
//!
//! `DeprecationExpectations` records per-link count baselines when an
//! expectation is declared and compares them against the registry after the
//! code under test ran. It is a convenience wrapper over
//! [`DeprecationRegistry::triggered_count`]; no delivery backend needs to
//! be active, tracking alone is enough.
//!
//! ```
//! use deprecations::{DeprecationExpectations, DeprecationRegistry};
//!
//! let registry = DeprecationRegistry::new();
//! let mut expectations = DeprecationExpectations::new(&registry);
//! expectations.expect_deprecation("https://github.com/acme/orm/issues/17");
//!
//! registry.trigger("acme/orm", "https://github.com/acme/orm/issues/17", "old API", &[]);
//!
//! assert!(expectations.verify().is_ok());
//! ```

use std::error::Error;
use std::fmt;

use crate::application::registry::DeprecationRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Fired,
    Silent,
}

#[derive(Debug, Clone)]
struct Expectation {
    link: String,
    baseline: u64,
    kind: Kind,
}

/// Failed expectation reported by [`DeprecationExpectations::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectationError {
    /// An expected deprecation did not fire after its baseline was taken.
    NotTriggered {
        /// The link identifier that stayed silent.
        link: String,
    },
    /// A forbidden deprecation fired after its baseline was taken.
    UnexpectedlyTriggered {
        /// The link identifier that fired.
        link: String,
        /// How many times it fired since the baseline.
        occurrences: u64,
    },
}

impl fmt::Display for ExpectationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectationError::NotTriggered { link } => write!(
                f,
                "expected deprecation with identifier '{link}' was not triggered"
            ),
            ExpectationError::UnexpectedlyTriggered { link, occurrences } => write!(
                f,
                "deprecation with identifier '{link}' was unexpectedly triggered {occurrences} time(s)"
            ),
        }
    }
}

impl Error for ExpectationError {}

/// Collects deprecation expectations against one registry instance.
#[derive(Debug)]
pub struct DeprecationExpectations<'a> {
    registry: &'a DeprecationRegistry,
    expectations: Vec<Expectation>,
}

impl<'a> DeprecationExpectations<'a> {
    /// Start collecting expectations against `registry`.
    pub fn new(registry: &'a DeprecationRegistry) -> Self {
        Self {
            registry,
            expectations: Vec::new(),
        }
    }

    /// Expect the given identifier to fire at least once from now on.
    pub fn expect_deprecation(&mut self, link: impl Into<String>) {
        self.record(link.into(), Kind::Fired);
    }

    /// Expect the given identifier not to fire from now on.
    pub fn expect_no_deprecation(&mut self, link: impl Into<String>) {
        self.record(link.into(), Kind::Silent);
    }

    fn record(&mut self, link: String, kind: Kind) {
        let baseline = self.registry.triggered_count(&link);
        self.expectations.push(Expectation {
            link,
            baseline,
            kind,
        });
    }

    /// Check every recorded expectation against the registry's counters.
    ///
    /// Returns the first violation found, in declaration order.
    pub fn verify(&self) -> Result<(), ExpectationError> {
        for expectation in &self.expectations {
            let current = self.registry.triggered_count(&expectation.link);

            match expectation.kind {
                Kind::Fired if current <= expectation.baseline => {
                    return Err(ExpectationError::NotTriggered {
                        link: expectation.link.clone(),
                    });
                }
                Kind::Silent if current > expectation.baseline => {
                    return Err(ExpectationError::UnexpectedlyTriggered {
                        link: expectation.link.clone(),
                        occurrences: current - expectation.baseline,
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}
