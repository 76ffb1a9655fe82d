//! Line level parsing for the SSE subset the gateway speaks

use crate::constants::{CR, COMMENT_PREFIX, DATA_PREFIX, ID_PREFIX, LF};

/// One line of an SSE stream, classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLine<'a> {
    /// Frame terminator
    Blank,
    /// `id: <value>`
    Id(&'a str),
    /// `data: <value>`
    Data(&'a str),
    /// Starts with `:`. Kept apart from [FrameLine::Other] for tracing only, both are ignored
    Comment(&'a str),
    /// Any other field (`event:`, `retry:`) or a malformed line
    Other(&'a str),
}

impl FrameLine<'_> {
    /// True for lines the accumulator does nothing with
    pub fn is_ignored(&self) -> bool {
        matches!(self, FrameLine::Comment(_) | FrameLine::Other(_))
    }
}

/// Classifies a line that has already had its line ending removed.
///
/// Only the exact prefixes `id: ` and `data: ` are recognised, so `id:7` and `data:x` fall through to
/// [FrameLine::Other].
pub fn parse_line(line: &str) -> FrameLine<'_> {
    if line.is_empty() {
        return FrameLine::Blank;
    }

    if let Some(id) = line.strip_prefix(ID_PREFIX) {
        FrameLine::Id(id)
    } else if let Some(data) = line.strip_prefix(DATA_PREFIX) {
        FrameLine::Data(data)
    } else if let Some(comment) = line.strip_prefix(COMMENT_PREFIX) {
        FrameLine::Comment(comment)
    } else {
        FrameLine::Other(line)
    }
}

/// Splits a slice at the next LF. Returns a tuple where the first value is the non-inclusive end of the line (a CR
/// right before the LF is excluded) and the second value is the inclusive start of the remainder.
/// Returns [None] if no LF is found yet.
pub fn find_eol(bytes: &[u8]) -> Option<(usize, usize)> {
    let lf = memchr::memchr(LF, bytes)?;
    let line_end = if lf > 0 && bytes[lf - 1] == CR {
        lf - 1
    } else {
        lf
    };
    Some((line_end, lf + 1))
}

/// Strips a trailing LF or CRLF from a line
pub fn trim_eol(mut line: &[u8]) -> &[u8] {
    if let [rest @ .., LF] = line {
        line = rest;
    }
    if let [rest @ .., CR] = line {
        line = rest;
    }
    line
}
