//! Logging helpers that keep multi-line narration on one log line.

use std::fmt::Write;

/// Longest preview written to a log record.
const MAX_PREVIEW: usize = 300;

/// Escapes a string for single-line logging.
///
/// Newlines, carriage returns, tabs and backslashes are escaped, other
/// control characters become `\xNN`, and anything past [`MAX_PREVIEW`]
/// characters is cut with an ellipsis.
#[must_use]
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
