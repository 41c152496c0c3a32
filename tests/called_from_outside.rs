//! Caller-classification scenarios for `trigger_if_called_from_outside`.
//!
//! The deterministic cases build `CallerFrames` explicitly, standing in for
//! fixture packages with known source trees; the last case exercises real
//! frame capture through `caller_frames!` (callers under `tests/` are
//! always classified as external).

use std::sync::Arc;

use deprecations::{
    caller_frames, CallFrame, CallerFrames, DeclaredPackage, DeprecationRegistry, MockWarningSink,
};

const FOO_PACKAGE: DeclaredPackage = DeclaredPackage::new("acme/foo", "vendor/acme/foo");
const FOO_LINK: &str = "https://github.com/acme/foo";

fn registry_with_mock_warnings() -> (DeprecationRegistry, Arc<MockWarningSink>) {
    let sink = Arc::new(MockWarningSink::new());
    let registry = DeprecationRegistry::with_warning_sink(sink.clone());
    registry.enable_warnings();
    (registry, sink)
}

/// Stand-in for the deprecated entry point `old_func` of acme/foo, reached
/// from application code.
fn old_func_called_from_app(registry: &DeprecationRegistry) {
    let frames = CallerFrames::new(
        CallFrame::new("vendor/acme/foo/src/bar.rs", 16),
        CallFrame::new("app/src/main.rs", 14),
    );
    registry.trigger_if_called_from_outside(
        &FOO_PACKAGE,
        frames,
        FOO_LINK,
        "old_func() is deprecated, use new_func() instead.",
        &[],
    );
}

/// Stand-in for `new_func` of acme/foo delegating to `old_func` internally.
fn old_func_called_from_new_func(registry: &DeprecationRegistry) {
    let frames = CallerFrames::new(
        CallFrame::new("vendor/acme/foo/src/bar.rs", 16),
        CallFrame::new("vendor/acme/foo/src/bar.rs", 24),
    );
    registry.trigger_if_called_from_outside(
        &FOO_PACKAGE,
        frames,
        FOO_LINK,
        "old_func() is deprecated, use new_func() instead.",
        &[],
    );
}

#[test]
fn test_external_caller_is_warned() {
    let (registry, sink) = registry_with_mock_warnings();

    old_func_called_from_app(&registry);

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with(
        "old_func() is deprecated, use new_func() instead. (bar.rs:16 called by main.rs:14"
    ));
    assert!(messages[0].contains(FOO_LINK));
    assert_eq!(registry.unique_triggered_count(), 1);
}

#[test]
fn test_internal_delegation_is_not_warned() {
    let (registry, sink) = registry_with_mock_warnings();

    old_func_called_from_new_func(&registry);

    assert!(sink.messages().is_empty());
    assert_eq!(registry.unique_triggered_count(), 0);
}

#[test]
fn test_unrelated_code_invoking_the_heuristic_is_suppressed() {
    let (registry, sink) = registry_with_mock_warnings();

    // Site frame outside the declaring package's source tree: the
    // heuristic was not even invoked from inside the package boundary.
    let frames = CallerFrames::new(
        CallFrame::new("app/src/main.rs", 5),
        CallFrame::new("app/src/other.rs", 9),
    );
    registry.trigger_if_called_from_outside(&FOO_PACKAGE, frames, FOO_LINK, "msg", &[]);

    assert!(sink.messages().is_empty());
    assert_eq!(registry.unique_triggered_count(), 0);
}

#[test]
fn test_external_delivery_follows_dedup_and_ignores() {
    let (registry, sink) = registry_with_mock_warnings();

    old_func_called_from_app(&registry);
    old_func_called_from_app(&registry);

    assert_eq!(sink.messages().len(), 1);
    assert_eq!(registry.triggered_count(FOO_LINK), 2);

    let (registry, sink) = registry_with_mock_warnings();
    registry.ignore_package("acme/foo");

    old_func_called_from_app(&registry);

    assert!(sink.messages().is_empty());
    assert_eq!(registry.triggered_count(FOO_LINK), 1);
}

/// Deprecated entry point declared at crate root; when invoked from this
/// test file its caller frame is under `tests/`, which the classification
/// always treats as external.
#[track_caller]
fn root_deprecation(registry: &DeprecationRegistry) {
    const ROOT_PACKAGE: DeclaredPackage = DeclaredPackage::new("acme/orm", "tests");
    registry.trigger_if_called_from_outside(
        &ROOT_PACKAGE,
        caller_frames!(),
        "https://github.com/acme/orm/issues/4444",
        "this is deprecated %s %d",
        &[&"foo", &1234],
    );
}

#[test]
fn test_captured_frames_from_test_caller_deliver() {
    let (registry, sink) = registry_with_mock_warnings();

    root_deprecation(&registry);

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("this is deprecated foo 1234"));
    assert!(messages[0].contains("called by called_from_outside.rs:"));
    assert_eq!(registry.unique_triggered_count(), 1);
}
