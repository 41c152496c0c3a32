//! Positional message template rendering.
//!
//! Deprecation messages use print-style positional placeholders: `%s` and
//! `%d` both substitute the next argument, `%%` yields a literal percent
//! sign. Rendering is permissive but deterministic: an unknown specifier or
//! a placeholder without a matching argument is kept verbatim, surplus
//! arguments are ignored.

use std::fmt::{Display, Write};

/// Render a message template by substituting positional arguments.
///
/// # Arguments
/// * `template` - Message with `%s` / `%d` placeholders
/// * `args` - Arguments consumed left to right, one per placeholder
///
/// # Example
/// ```
/// use deprecations::domain::template::format_message;
///
/// let rendered = format_message("this is deprecated %s %d", &[&"foo", &1234]);
/// assert_eq!(rendered, "this is deprecated foo 1234");
/// ```
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next_arg = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(&(spec @ ('s' | 'd'))) => match next_arg.next() {
                Some(arg) => {
                    chars.next();
                    // Infallible for String targets.
                    let _ = write!(out, "{arg}");
                }
                None => {
                    chars.next();
                    out.push('%');
                    out.push(spec);
                }
            },
            _ => out.push('%'),
        }
    }

    out
}

/// Build a `&[&dyn Display]` argument slice for [`format_message`] and the
/// registry trigger operations.
///
/// # Example
/// ```
/// use deprecations::template_args;
/// use deprecations::domain::template::format_message;
///
/// let rendered = format_message("msg %s %d", template_args!["x", 7]);
/// assert_eq!(rendered, "msg x 7");
/// ```
#[macro_export]
macro_rules! template_args {
    ($($arg:expr),* $(,)?) => {
        &[$(&$arg as &dyn ::std::fmt::Display),*][..]
    };
}
