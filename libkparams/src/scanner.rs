//! Phase 1: Line classifier
//!
//! Every raw line is classified by its count of leading tabs and the first
//! character after them:
//!
//! | tabs | first char    | kind                 |
//! |------|---------------|----------------------|
//! | -    | (empty line)  | `Blank`              |
//! | 1    | alphanumeric  | `TopHeader`          |
//! | 2    | alphanumeric  | `NestedHeader`       |
//! | 3    | anything      | `Continuation(Three)`|
//! | 4+   | anything      | `Continuation(Four)` |
//!
//! Everything else is `Ignored`.

/// Continuation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Format/value lines of a parameter, or description of a sub-parameter.
    Three,
    /// Description of a sub-parameter.
    Four,
}

/// Role of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Header text with indentation removed.
    TopHeader(&'a str),
    NestedHeader(&'a str),
    /// Continuation text, trimmed.
    Continuation(Depth, &'a str),
    Ignored,
}

/// Classify one line. The line terminator must already be removed.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }

    let indent = count_indent(line);
    let rest = &line[indent..];
    let starts_name = rest
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric());

    match indent {
        1 if starts_name => LineKind::TopHeader(rest.trim_end()),
        2 if starts_name => LineKind::NestedHeader(rest.trim_end()),
        3 => LineKind::Continuation(Depth::Three, rest.trim()),
        n if n >= 4 => LineKind::Continuation(Depth::Four, rest.trim()),
        _ => LineKind::Ignored,
    }
}

/// Count the number of leading tabs in a line.
pub fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'\t').count()
}
