//! Caller frames and the called-from-outside classification.
//!
//! Instead of inspecting a runtime stack, call sites are captured as explicit
//! [`CallFrame`] values: `trigger` picks up its own caller through
//! `#[track_caller]`, and deprecated entry points that want the
//! called-from-outside heuristic capture both relevant frames with
//! [`caller_frames!`](crate::caller_frames). Tests build frames directly for
//! deterministic classification.

use std::borrow::Cow;
use std::panic::Location;
use std::path::{Component, Path};

/// A single captured call-site location: source file and line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallFrame {
    file: Cow<'static, str>,
    line: u32,
}

impl CallFrame {
    /// Create a frame from a file path and line number.
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Full path of the source file, as captured.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number within the file.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Final path component of the source file, for compact display.
    pub fn basename(&self) -> &str {
        Path::new(self.file.as_ref())
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.file)
    }

    /// True if the file lies under a conventional `tests` directory.
    pub fn is_test_path(&self) -> bool {
        Path::new(self.file.as_ref())
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == "tests"))
    }

    /// True if the file path starts with the given source root,
    /// component-wise.
    pub fn is_within(&self, source_root: &str) -> bool {
        Path::new(self.file.as_ref()).starts_with(source_root)
    }
}

impl From<&'static Location<'static>> for CallFrame {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
        }
    }
}

/// The two frames relevant to the called-from-outside heuristic.
///
/// `site` is the location inside the deprecated function itself; `caller` is
/// whoever invoked that function. Capture both with
/// [`caller_frames!`](crate::caller_frames) from a `#[track_caller]`
/// function, or construct them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrames {
    /// Location inside the deprecated entry point.
    pub site: CallFrame,
    /// Location of the code that called the deprecated entry point.
    pub caller: CallFrame,
}

impl CallerFrames {
    /// Create a frame pair from explicit frames.
    pub fn new(site: CallFrame, caller: CallFrame) -> Self {
        Self { site, caller }
    }
}

/// Classification of a deprecated call relative to its declaring package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOrigin {
    /// The call reached the deprecated entry point from outside the
    /// declaring package (or from a test); the notice should be delivered.
    External,
    /// One function of the declaring package delegated to another; the
    /// package's own internals are not warned about themselves.
    InternalDelegation,
    /// The deprecated entry point's own frame is not inside the declaring
    /// package's source tree at all; the heuristic was invoked from
    /// unrelated code and the notice is suppressed.
    OutsideDeclaringPackage,
}

/// Classify a deprecated call against the declaring package's source root.
///
/// Rules, in order:
/// 1. A caller under a `tests` path is always treated as external.
/// 2. A site frame outside `source_root` means the heuristic was not even
///    invoked from inside the package boundary.
/// 3. A caller inside `source_root` is package-internal delegation.
/// 4. Everything else is an external caller.
pub fn classify(frames: &CallerFrames, source_root: &str) -> CallOrigin {
    if frames.caller.is_test_path() {
        return CallOrigin::External;
    }

    if !frames.site.is_within(source_root) {
        return CallOrigin::OutsideDeclaringPackage;
    }

    if frames.caller.is_within(source_root) {
        return CallOrigin::InternalDelegation;
    }

    CallOrigin::External
}

/// Capture the [`CallerFrames`] of the enclosing deprecated function.
///
/// The expansion site provides the `site` frame via `file!()` / `line!()`;
/// the `caller` frame comes from `std::panic::Location::caller()`, so the
/// enclosing function **must** be annotated with `#[track_caller]` for the
/// caller frame to point at its caller rather than at the function itself.
///
/// ```
/// use deprecations::{caller_frames, CallerFrames};
///
/// #[track_caller]
/// fn deprecated_entry_point() -> CallerFrames {
///     caller_frames!()
/// }
///
/// let frames = deprecated_entry_point();
/// assert!(frames.site.file().ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! caller_frames {
    () => {
        $crate::CallerFrames::new(
            $crate::CallFrame::new(file!(), line!()),
            $crate::CallFrame::from(::std::panic::Location::caller()),
        )
    };
}
