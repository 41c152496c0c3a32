//! Deprecation notices and their backend renderings.
//!
//! A [`DeprecationNotice`] bundles everything known about one triggered
//! deprecation: the declaring package, the deduplication link, the rendered
//! message and the captured call frames. Backends consume it in two forms:
//! the warning sink gets a single suffixed line, the structured-log sink
//! gets the message plus a [`NoticeFields`] mapping.

use crate::domain::frames::CallFrame;

/// A fully resolved deprecation notice, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    /// Package that declares the deprecation (e.g. "acme/orm").
    pub package: String,
    /// Version in which the deprecation was introduced, if declared.
    pub since: Option<String>,
    /// Stable link identifier, conventionally an issue URL.
    pub link: String,
    /// Rendered message (template arguments already substituted).
    pub message: String,
    /// Frame of the triggering call site.
    pub site: CallFrame,
    /// Frame of the code that called the deprecated entry point, when the
    /// called-from-outside heuristic captured it.
    pub called_by: Option<CallFrame>,
}

impl DeprecationNotice {
    /// Render the single-line form delivered to the warning sink.
    ///
    /// Format: `message (file:line[ called by file:line], link, package
    /// name[, since version])`, with file basenames for compactness.
    pub fn warning_line(&self) -> String {
        let mut line = format!(
            "{} ({}:{}",
            self.message,
            self.site.basename(),
            self.site.line()
        );

        if let Some(caller) = &self.called_by {
            line.push_str(&format!(
                " called by {}:{}",
                caller.basename(),
                caller.line()
            ));
        }

        line.push_str(&format!(", {}, package {}", self.link, self.package));

        if let Some(since) = &self.since {
            line.push_str(&format!(", since {since}"));
        }

        line.push(')');
        line
    }

    /// The structured field mapping delivered to the log sink.
    pub fn fields(&self) -> NoticeFields {
        NoticeFields {
            file: self.site.file().to_owned(),
            line: self.site.line(),
            package: self.package.clone(),
            link: self.link.clone(),
            since: self.since.clone(),
        }
    }
}

/// Named fields attached to a structured-log delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeFields {
    /// Full path of the triggering source file.
    pub file: String,
    /// Line of the triggering call site.
    pub line: u32,
    /// Declaring package.
    pub package: String,
    /// Link identifier.
    pub link: String,
    /// Declared starting version, if any.
    pub since: Option<String>,
}
