//! Central registry for deprecation emission and tracking.
//!
//! The registry holds the backend configuration, the per-link occurrence
//! counters that deduplication and test assertions rely on, the permanent
//! ignore lists and the transient suppression-scope depth. It is an
//! explicit context object owned by the host (typically shared in an
//! `Arc`), not process-global state; tests build isolated instances.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::DashMap;

use crate::application::metrics::DeliveryMetrics;
use crate::application::ports::{DeprecationSeverity, LogSink, WarningSink};
use crate::domain::frames::{classify, CallFrame, CallOrigin, CallerFrames};
use crate::domain::notice::DeprecationNotice;
use crate::domain::template::format_message;
use crate::domain::version;
use crate::infrastructure::sinks::StderrWarningSink;

type Map<V> = DashMap<String, V, ahash::RandomState>;

/// Active delivery modes. Any combination of the flags may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Backends {
    warn: bool,
    suppressed_warn: bool,
    log: bool,
    track: bool,
}

impl Backends {
    const INERT: Backends = Backends {
        warn: false,
        suppressed_warn: false,
        log: false,
        track: false,
    };

    fn delivery_active(self) -> bool {
        self.warn || self.suppressed_warn || self.log
    }

    fn any_active(self) -> bool {
        self.track || self.delivery_active()
    }
}

impl Default for Backends {
    fn default() -> Self {
        // A fresh registry counts occurrences but delivers nothing.
        Backends {
            track: true,
            ..Self::INERT
        }
    }
}

/// Per-link tracking state.
///
/// `count` is monotonic within a tracking epoch; `silenced` marks links
/// registered through [`DeprecationRegistry::ignore_deprecations`] and
/// survives epoch resets.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkState {
    count: u64,
    silenced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PackageIgnore {
    Always,
    Since(String),
}

#[derive(Debug)]
struct BackendConfig {
    backends: Backends,
    deduplicate: bool,
    log_sink: Option<Arc<dyn LogSink>>,
    warning_sink: Arc<dyn WarningSink>,
}

/// Identity of a package that declares deprecations, paired with its source
/// root for the called-from-outside classification.
///
/// Usually declared once as a constant next to the package's deprecated
/// entry points:
///
/// ```
/// use deprecations::DeclaredPackage;
///
/// const PACKAGE: DeclaredPackage = DeclaredPackage::new("acme/orm", "vendor/acme/orm");
/// assert_eq!(PACKAGE.name(), "acme/orm");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredPackage {
    name: &'static str,
    source_root: &'static str,
}

impl DeclaredPackage {
    /// Declare a package by name and source-tree root.
    pub const fn new(name: &'static str, source_root: &'static str) -> Self {
        Self { name, source_root }
    }

    /// Package identifier used in notices and ignore lists.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Root under which the package's own source files live, in the same
    /// form the captured call frames use.
    pub fn source_root(&self) -> &'static str {
        self.source_root
    }
}

/// Registry managing deprecation backends, counters and suppression state.
///
/// All operations are synchronous and thread-safe: configuration sits
/// behind a single lock, occurrence counters use the concurrent map's entry
/// API, and the scope depth is atomic.
///
/// # Example
/// ```
/// use deprecations::DeprecationRegistry;
///
/// let registry = DeprecationRegistry::new();
/// registry.trigger("acme/orm", "https://github.com/acme/orm/issues/17", "old API %s", &[&"x"]);
///
/// assert_eq!(registry.unique_triggered_count(), 1);
/// ```
#[derive(Debug)]
pub struct DeprecationRegistry {
    config: RwLock<BackendConfig>,
    links: Map<LinkState>,
    ignored_packages: Map<PackageIgnore>,
    suppression_depth: AtomicUsize,
    metrics: DeliveryMetrics,
}

impl DeprecationRegistry {
    /// Create a registry in its initial state: tracking only, deduplication
    /// on, warnings routed to stderr once enabled.
    pub fn new() -> Self {
        Self::with_warning_sink(Arc::new(StderrWarningSink::new()))
    }

    /// Create a registry with a custom warning sink.
    pub fn with_warning_sink(warning_sink: Arc<dyn WarningSink>) -> Self {
        Self {
            config: RwLock::new(BackendConfig {
                backends: Backends::default(),
                deduplicate: true,
                log_sink: None,
                warning_sink,
            }),
            links: Map::with_hasher(ahash::RandomState::new()),
            ignored_packages: Map::with_hasher(ahash::RandomState::new()),
            suppression_depth: AtomicUsize::new(0),
            metrics: DeliveryMetrics::new(),
        }
    }

    fn read_config(&self) -> RwLockReadGuard<'_, BackendConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_config(&self) -> RwLockWriteGuard<'_, BackendConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ---- Backend configuration -------------------------------------------

    /// Enable the process-level warning backend.
    pub fn enable_warnings(&self) {
        let mut cfg = self.write_config();
        cfg.backends.warn = true;
        cfg.backends.suppressed_warn = false;
    }

    /// Enable the warning backend in best-effort mode: delivery failures
    /// are discarded and never escalate anywhere.
    pub fn enable_suppressed_warnings(&self) {
        let mut cfg = self.write_config();
        cfg.backends.suppressed_warn = true;
        cfg.backends.warn = false;
    }

    /// Enable the structured-log backend with the given sink.
    ///
    /// May be combined with the warning backend; each active backend
    /// receives every delivered notice.
    pub fn enable_with_log_sink(&self, sink: Arc<dyn LogSink>) {
        let mut cfg = self.write_config();
        cfg.backends.log = true;
        cfg.log_sink = Some(sink);
    }

    /// Enable occurrence tracking without any delivery backend.
    pub fn enable_tracking(&self) {
        self.write_config().backends.track = true;
    }

    /// Deliver every occurrence instead of only the first per link.
    pub fn without_deduplication(&self) {
        self.write_config().deduplicate = false;
    }

    /// Restore first-occurrence-only delivery.
    pub fn with_deduplication(&self) {
        self.write_config().deduplicate = true;
    }

    /// Replace the warning sink adapter.
    pub fn set_warning_sink(&self, sink: Arc<dyn WarningSink>) {
        self.write_config().warning_sink = sink;
    }

    /// Reset the registry to its inert state and end the tracking epoch.
    ///
    /// Backend flags are cleared, the log sink handle is dropped,
    /// deduplication returns to its default, every occurrence counter is
    /// zeroed while its key (and any silenced marker) is preserved, the
    /// suppression depth resets to zero and delivery metrics restart.
    /// Ignored packages persist. Never fails; safe to call from cleanup
    /// code.
    pub fn disable(&self) {
        {
            let mut cfg = self.write_config();
            cfg.backends = Backends::INERT;
            cfg.log_sink = None;
            cfg.deduplicate = true;
        }

        for mut entry in self.links.iter_mut() {
            entry.value_mut().count = 0;
        }

        self.suppression_depth.store(0, Ordering::Release);
        self.metrics.reset();
    }

    // ---- Triggering ------------------------------------------------------

    /// Trigger a deprecation for the given package.
    ///
    /// The link should point to an issue or wiki entry detailing the
    /// deprecation; it doubles as the deduplication key for this process.
    /// `message` uses positional placeholders (`%s`, `%d`) filled from
    /// `args`; the [`template_args!`](crate::template_args) macro builds the
    /// slice. Never fails for normal inputs.
    #[track_caller]
    pub fn trigger(&self, package: &str, link: &str, message: &str, args: &[&dyn Display]) {
        let site = CallFrame::from(Location::caller());
        self.trigger_at(package, None, link, message, args, site, None);
    }

    /// Trigger a deprecation that records the version it started in.
    ///
    /// The version participates in versioned package ignores
    /// ([`ignore_package_since`](Self::ignore_package_since)) and appears in
    /// delivered notices as `since`.
    #[track_caller]
    pub fn trigger_since(
        &self,
        package: &str,
        since: &str,
        link: &str,
        message: &str,
        args: &[&dyn Display],
    ) {
        let site = CallFrame::from(Location::caller());
        self.trigger_at(package, Some(since), link, message, args, site, None);
    }

    /// Trigger only when the deprecated entry point was reached from
    /// outside its declaring package.
    ///
    /// Lets a package warn downstream callers of a deprecated entry point
    /// without warning its own internals when one deprecated method
    /// delegates to another. Callers under a `tests` path are always
    /// treated as external. Classification-suppressed calls do not advance
    /// the occurrence counter.
    ///
    /// The deprecated function captures `frames` with
    /// [`caller_frames!`](crate::caller_frames) and must be annotated with
    /// `#[track_caller]`.
    pub fn trigger_if_called_from_outside(
        &self,
        package: &DeclaredPackage,
        frames: CallerFrames,
        link: &str,
        message: &str,
        args: &[&dyn Display],
    ) {
        match classify(&frames, package.source_root()) {
            CallOrigin::InternalDelegation | CallOrigin::OutsideDeclaringPackage => {}
            CallOrigin::External => self.trigger_at(
                package.name(),
                None,
                link,
                message,
                args,
                frames.site,
                Some(frames.caller),
            ),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn trigger_at(
        &self,
        package: &str,
        since: Option<&str>,
        link: &str,
        message: &str,
        args: &[&dyn Display],
        site: CallFrame,
        called_by: Option<CallFrame>,
    ) {
        let (backends, deduplicate, log_sink, warning_sink) = {
            let cfg = self.read_config();
            (
                cfg.backends,
                cfg.deduplicate,
                cfg.log_sink.clone(),
                Arc::clone(&cfg.warning_sink),
            )
        };

        if !backends.any_active() {
            return;
        }

        // Counting is authoritative for test assertions and happens before
        // any delivery decision. The entry holds a shard lock, so the scope
        // is kept tight.
        let (count, silenced) = {
            let mut entry = self.links.entry(link.to_owned()).or_insert(LinkState {
                count: 0,
                silenced: false,
            });
            entry.count += 1;
            (entry.count, entry.silenced)
        };

        if !backends.delivery_active() {
            return;
        }

        if deduplicate && count > 1 {
            self.metrics.record_deduplicated();
            return;
        }

        if silenced {
            self.metrics.record_suppressed();
            return;
        }

        if self.package_is_ignored(package, since) {
            self.metrics.record_suppressed();
            return;
        }

        if self.suppression_depth.load(Ordering::Acquire) > 0 {
            self.metrics.record_suppressed();
            return;
        }

        let notice = DeprecationNotice {
            package: package.to_owned(),
            since: since.map(str::to_owned),
            link: link.to_owned(),
            message: format_message(message, args),
            site,
            called_by,
        };

        if backends.warn || backends.suppressed_warn {
            let severity = if backends.suppressed_warn {
                DeprecationSeverity::SuppressedWarning
            } else {
                DeprecationSeverity::Warning
            };

            match warning_sink.emit(&notice.warning_line(), severity) {
                Ok(()) => {}
                // Suppressed mode guarantees non-escalation; the error is
                // discarded here on purpose.
                Err(_) if backends.suppressed_warn => {}
                Err(error) => tracing::error!(
                    target: "deprecations",
                    error = %error,
                    link = %notice.link,
                    "deprecation warning sink failed"
                ),
            }
        }

        if backends.log {
            if let Some(sink) = &log_sink {
                sink.notice(&notice.message, &notice.fields());
            }
        }

        self.metrics.record_delivered();
    }

    fn package_is_ignored(&self, package: &str, since: Option<&str>) -> bool {
        match self.ignored_packages.get(package).map(|e| e.value().clone()) {
            None => false,
            Some(PackageIgnore::Always) => true,
            Some(PackageIgnore::Since(threshold)) => {
                since.is_some_and(|v| version::at_least(v, &threshold))
            }
        }
    }

    // ---- Ignore management -----------------------------------------------

    /// Stop delivering notices for the given package. Occurrences are still
    /// counted.
    pub fn ignore_package(&self, package: &str) {
        self.ignored_packages
            .insert(package.to_owned(), PackageIgnore::Always);
    }

    /// Stop delivering version-carrying notices for the package whose
    /// `since` version is at least `version`. Plain triggers from the
    /// package still deliver.
    pub fn ignore_package_since(&self, package: &str, version: &str) {
        self.ignored_packages
            .insert(package.to_owned(), PackageIgnore::Since(version.to_owned()));
    }

    /// Permanently silence the given link identifiers.
    ///
    /// Each link is pre-registered at count zero; future triggers advance
    /// its counter but never deliver. The silencing survives
    /// [`disable`](Self::disable).
    pub fn ignore_deprecations<I, S>(&self, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for link in links {
            self.links
                .entry(link.into())
                .and_modify(|state| state.silenced = true)
                .or_insert(LinkState {
                    count: 0,
                    silenced: true,
                });
        }
    }

    // ---- Scoped suppression ----------------------------------------------

    /// Run `work` with notice delivery suppressed for its dynamic extent.
    ///
    /// Occurrence counting continues. Scopes nest; delivery stays off until
    /// the outermost scope exits, and is restored even when `work` panics.
    pub fn run_ignoring_deprecations<T>(&self, work: impl FnOnce() -> T) -> T {
        let _guard = self.ignore_scope();
        work()
    }

    /// Enter a suppression scope directly; exits when the guard drops.
    #[must_use = "delivery is re-enabled when the guard drops"]
    pub fn ignore_scope(&self) -> SuppressionGuard<'_> {
        self.suppression_depth.fetch_add(1, Ordering::AcqRel);
        SuppressionGuard { registry: self }
    }

    // ---- Query API -------------------------------------------------------

    /// Sum of all occurrence counters this tracking epoch.
    pub fn unique_triggered_count(&self) -> u64 {
        self.links.iter().map(|e| e.value().count).sum()
    }

    /// Snapshot of every tracked link and its occurrence count.
    pub fn triggered_deprecations(&self) -> BTreeMap<String, u64> {
        self.links
            .iter()
            .map(|e| (e.key().clone(), e.value().count))
            .collect()
    }

    /// Occurrence count for a single link (zero when never triggered).
    pub fn triggered_count(&self, link: &str) -> u64 {
        self.links.get(link).map_or(0, |e| e.value().count)
    }

    /// Delivery metrics for the current epoch.
    pub fn metrics(&self) -> &DeliveryMetrics {
        &self.metrics
    }
}

impl Default for DeprecationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for a suppression scope.
///
/// Dropping the guard leaves the scope; a guard outliving a
/// [`DeprecationRegistry::disable`] call decrements saturatingly and
/// becomes a no-op.
#[derive(Debug)]
pub struct SuppressionGuard<'a> {
    registry: &'a DeprecationRegistry,
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        let _ = self.registry.suppression_depth.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |depth| depth.checked_sub(1),
        );
    }
}
