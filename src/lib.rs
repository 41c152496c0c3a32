//! # deprecations
//!
//! Deprecation-notice emission, deduplication and tracking for library
//! producers.
//!
//! A [`DeprecationRegistry`] lets producer code mark call sites as
//! deprecated, routes the resulting notices to configurable backends
//! (structured logger, process-level warning sink, or silent counting),
//! deduplicates repeated notices per link identifier, and exposes the
//! occurrence counters that tests assert on.
//!
//! ## Quick Start
//!
//! ```rust
//! use deprecations::DeprecationRegistry;
//!
//! let registry = DeprecationRegistry::new();
//!
//! // Route notices to stderr as process-level warnings.
//! registry.enable_warnings();
//!
//! // Producer code marks a deprecated call site. The link identifies the
//! // deprecation and doubles as the deduplication key.
//! registry.trigger(
//!     "acme/orm",
//!     "https://github.com/acme/orm/issues/1234",
//!     "this is deprecated %s %d",
//!     &[&"foo", &1234],
//! );
//!
//! assert_eq!(registry.unique_triggered_count(), 1);
//! ```
//!
//! The registry is an explicit context object, not process-global state.
//! Hosts typically create one at startup and share it in an `Arc`; tests
//! build isolated instances and never need to reset shared state.
//!
//! ## Backends
//!
//! Any combination of backends may be active at once:
//!
//! - **Warnings** ([`DeprecationRegistry::enable_warnings`]): one suffixed
//!   line per notice through a [`WarningSink`] (stderr by default). The
//!   suppressed variant
//!   ([`DeprecationRegistry::enable_suppressed_warnings`]) discards sink
//!   failures instead of reporting them.
//! - **Structured log** ([`DeprecationRegistry::enable_with_log_sink`]):
//!   the rendered message plus `{file, line, package, link, since}` fields
//!   through a [`LogSink`]; [`TracingLogSink`] forwards them to the
//!   `tracing` ecosystem.
//! - **Tracking only** (the default): occurrence counters advance, nothing
//!   is delivered.
//!
//! [`DeprecationRegistry::disable`] returns the registry to the inert
//! state and zeroes all counters while preserving their keys; it never
//! fails, so cleanup code can call it unconditionally.
//!
//! ## Deduplication
//!
//! With deduplication on (the default) each link delivers at most once per
//! tracking epoch, while its counter keeps advancing:
//!
//! ```rust
//! use std::sync::Arc;
//! use deprecations::{DeprecationRegistry, MockWarningSink};
//!
//! let sink = Arc::new(MockWarningSink::new());
//! let registry = DeprecationRegistry::with_warning_sink(sink.clone());
//! registry.enable_warnings();
//!
//! registry.trigger("acme/orm", "link-1", "msg %s %d", &[&"x", &7]);
//! registry.trigger("acme/orm", "link-1", "msg %s %d", &[&"x", &7]);
//!
//! assert_eq!(sink.messages().len(), 1);
//! assert_eq!(registry.triggered_count("link-1"), 2);
//! ```
//!
//! ## Warning Only External Callers
//!
//! A deprecated entry point can skip the notice when the call came from
//! inside its own package (one deprecated method delegating to another)
//! while still warning any external caller. The entry point captures its
//! caller frames with [`caller_frames!`] under `#[track_caller]`:
//!
//! ```rust
//! use deprecations::{caller_frames, DeclaredPackage, DeprecationRegistry};
//!
//! const PACKAGE: DeclaredPackage = DeclaredPackage::new("acme/foo", "vendor/acme/foo");
//!
//! #[track_caller]
//! pub fn old_func(registry: &DeprecationRegistry) {
//!     registry.trigger_if_called_from_outside(
//!         &PACKAGE,
//!         caller_frames!(),
//!         "https://github.com/acme/foo/issues/9",
//!         "old_func() is deprecated, use new_func() instead.",
//!         &[],
//!     );
//! }
//! ```
//!
//! ## Scoped Suppression
//!
//! [`DeprecationRegistry::run_ignoring_deprecations`] disables delivery
//! (not counting) for the dynamic extent of a closure, nests reentrantly,
//! and restores delivery on every exit path including panics.
//!
//! ## Testing Deprecations
//!
//! [`DeprecationExpectations`] asserts that specific identifiers did or did
//! not fire across a test body, using counter baselines:
//!
//! ```rust
//! use deprecations::{DeprecationExpectations, DeprecationRegistry};
//!
//! let registry = DeprecationRegistry::new();
//! let mut expectations = DeprecationExpectations::new(&registry);
//! expectations.expect_deprecation("link-1");
//! expectations.expect_no_deprecation("link-2");
//!
//! registry.trigger("acme/orm", "link-1", "old API", &[]);
//!
//! assert!(expectations.verify().is_ok());
//! ```
//!
//! [`MockLogSink`] and [`MockWarningSink`] record deliveries for
//! assertions on backend output.

// Domain layer - pure deprecation logic
pub mod domain;

// Application layer - registry orchestration
pub mod application;

// Infrastructure layer - sink adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    frames::{classify, CallFrame, CallOrigin, CallerFrames},
    notice::{DeprecationNotice, NoticeFields},
    template::format_message,
};

pub use application::{
    expectations::{DeprecationExpectations, ExpectationError},
    metrics::{DeliveryMetrics, MetricsSnapshot},
    ports::{DeprecationSeverity, LogSink, SinkError, WarningSink},
    registry::{DeclaredPackage, DeprecationRegistry, SuppressionGuard},
};

pub use infrastructure::{
    mocks::{MockLogSink, MockWarningSink},
    sinks::{StderrWarningSink, TracingLogSink},
};
