//! Phase 2: Value/format extraction
//!
//! Depth-3 lines under a top-level parameter either carry a format
//! (`Format: <int>`), an enumerated value list (`{ on | off }`, possibly
//! spread over several lines), or plain description text. Nothing is ever
//! rejected: whatever does not look like a format or a value list ends up
//! in the description.

use crate::entry::{Entry, Format};
use crate::header::FORMAT_PREFIX;

/// `cgroup_no_v1=` opens its value line with a doubled brace.
const DOUBLED_BRACE: &str = "{ {";

/// Outcome of feeding one line, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extracted {
    Format,
    Values,
    BlockOpened,
    BlockContinued,
    Description,
}

/// Per-entry extractor state: the open multi-line value block, if any.
#[derive(Debug, Default)]
pub struct Extractor {
    block: Option<Vec<String>>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.block.is_some()
    }

    /// Apply one trimmed depth-3 line to `entry`.
    pub fn feed(&mut self, entry: &mut Entry, line: &str) -> Extracted {
        let mut line = line;
        if let Some(rest) = line.strip_prefix(FORMAT_PREFIX) {
            if !rest.contains(['{', '}']) && self.block.is_none() {
                entry.format = Format::Literal(rest.trim().to_string());
                return Extracted::Format;
            }
            line = rest.trim_start();
        }

        let line = normalize_doubled_brace(line);
        let has_sep = has_separator(&line);

        if line.starts_with('{') && line.ends_with('}') && has_sep {
            self.flush(entry);
            let values = parse_values(&[line.as_str()]);
            if values.is_empty() {
                append_line(entry, &line);
                return Extracted::Description;
            }
            entry.format = Format::Enum(values);
            return Extracted::Values;
        }

        if line.starts_with('{') && !line.ends_with('}') && (has_sep || line == "{") {
            self.flush(entry);
            self.block = Some(vec![line]);
            return Extracted::BlockOpened;
        }

        if let Some(block) = self.block.as_mut() {
            if line.ends_with('}') {
                block.push(line);
                let lines = self.block.take().unwrap_or_default();
                let values = parse_values(&lines);
                if values.is_empty() {
                    for line in &lines {
                        append_line(entry, line);
                    }
                    return Extracted::Description;
                }
                entry.format = Format::Enum(values);
                return Extracted::Values;
            }
            if has_sep {
                block.push(line);
                return Extracted::BlockContinued;
            }
        }

        if line.len() >= 2 && line.starts_with('{') && line.ends_with('}') {
            let inner = line.trim_matches(|c| c == '{' || c == '}').trim();
            // An empty `{}` leaves the format as it was.
            if !inner.is_empty() {
                entry.format = Format::Literal(inner.to_string());
            }
            return Extracted::Format;
        }

        append_line(entry, &line);
        Extracted::Description
    }

    /// Move an unterminated value block into the description.
    pub fn flush(&mut self, entry: &mut Entry) {
        if let Some(lines) = self.block.take() {
            for line in &lines {
                append_line(entry, line);
            }
        }
    }
}

fn append_line(entry: &mut Entry, line: &str) {
    entry.description.push('\n');
    entry.description.push_str(line);
}

fn has_separator(line: &str) -> bool {
    line.contains(['|', ','])
}

/// Collapse the leading `{ {` of the `cgroup_no_v1=` value line.
pub fn normalize_doubled_brace(line: &str) -> String {
    if line.starts_with(DOUBLED_BRACE) {
        line.replacen(DOUBLED_BRACE, "{", 1)
    } else {
        line.to_string()
    }
}

/// Split the lines of a `{ a | b }` block into values.
///
/// `|` wins over `,` when it appears anywhere in the block. Each line is
/// split on its own, so a line break acts as a separator as well.
pub fn parse_values<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let sep = if lines.iter().any(|l| l.as_ref().contains('|')) {
        '|'
    } else {
        ','
    };

    lines
        .iter()
        .flat_map(|line| {
            line.as_ref()
                .trim()
                .trim_matches(|c| c == '{' || c == '}')
                .split(sep)
        })
        .map(|piece| {
            piece.trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ',' | '|'))
        })
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> (Entry, Extractor) {
        let mut entry = Entry::new("param");
        let mut extractor = Extractor::new();
        for line in lines {
            extractor.feed(&mut entry, line);
        }
        (entry, extractor)
    }

    #[test]
    fn test_format_directive() {
        let (entry, _) = run(&["Format: <int>"]);
        assert_eq!(entry.format, Format::Literal("<int>".into()));
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_single_line_pipe_enum() {
        let (entry, _) = run(&["Format: { on | off | \"force\" }"]);
        assert_eq!(entry.format.as_str(), "enum");
        assert_eq!(entry.values(), ["on", "off", "force"]);
    }

    #[test]
    fn test_single_line_comma_enum() {
        let (entry, _) = run(&["{ 'auto', 'never' }"]);
        assert_eq!(entry.values(), ["auto", "never"]);
    }

    #[test]
    fn test_pipe_wins_over_comma() {
        let (entry, _) = run(&["{ <int>,<int> | off }"]);
        assert_eq!(entry.values(), ["<int>,<int>", "off"]);
    }

    #[test]
    fn test_multi_line_block() {
        let (entry, extractor) = run(&[
            "Format: { s3_bios, s3_mode, s3_beep, s4_hwsig,",
            "s4_nohwsig, old_rtc, nonvs, sci_force_enable, nobl }",
        ]);
        assert!(!extractor.is_open());
        assert_eq!(
            entry.values(),
            [
                "s3_bios",
                "s3_mode",
                "s3_beep",
                "s4_hwsig",
                "s4_nohwsig",
                "old_rtc",
                "nonvs",
                "sci_force_enable",
                "nobl"
            ]
        );
    }

    #[test]
    fn test_block_closing_line_without_separator() {
        let (entry, _) = run(&["{", "a|b,", "c}"]);
        assert_eq!(entry.values(), ["a", "b", "c"]);
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_block_closing_brace_on_its_own_line() {
        let (entry, _) = run(&["{", "a|b,", "c", "}"]);
        // "c" has no separator, so it is prose while the block stays open.
        assert_eq!(entry.values(), ["a", "b"]);
        assert_eq!(entry.description, "\nc");
    }

    #[test]
    fn test_doubled_brace_line() {
        let (entry, _) = run(&["Format: { { controller | \"all\" | \"named\" }"]);
        assert_eq!(entry.values(), ["controller", "all", "named"]);
    }

    #[test]
    fn test_braced_text_without_separator_is_format() {
        let (entry, _) = run(&["{ <bytes> }"]);
        assert_eq!(entry.format, Format::Literal("<bytes>".into()));
        assert!(entry.values().is_empty());
    }

    #[test]
    fn test_prose_goes_to_description() {
        let (entry, _) = run(&["Enable the thing.", "See also foo, bar."]);
        assert_eq!(entry.format, Format::Unset);
        assert_eq!(entry.description, "\nEnable the thing.\nSee also foo, bar.");
    }

    #[test]
    fn test_format_directive_inside_open_block_is_not_a_format() {
        let (entry, extractor) = run(&["{ a,", "Format: b"]);
        assert!(extractor.is_open());
        assert_eq!(entry.format, Format::Unset);
        assert_eq!(entry.description, "\nb");
    }

    #[test]
    fn test_format_replaces_enum() {
        let (entry, _) = run(&["{ a | b }", "Format: <int>"]);
        assert_eq!(entry.format, Format::Literal("<int>".into()));
        assert!(entry.values().is_empty());
    }

    #[test]
    fn test_flush_moves_open_block_to_description() {
        let (mut entry, mut extractor) = run(&["{ a, b,", "c,"]);
        extractor.flush(&mut entry);
        assert!(!extractor.is_open());
        assert_eq!(entry.format, Format::Unset);
        assert_eq!(entry.description, "\n{ a, b,\nc,");
    }

    #[test]
    fn test_normalize_doubled_brace() {
        assert_eq!(normalize_doubled_brace("{ { a | b }"), "{ a | b }");
        assert_eq!(normalize_doubled_brace("{ a | b }"), "{ a | b }");
    }

    #[test]
    fn test_separators_without_values_are_description() {
        let (entry, _) = run(&["{ , }", "{|}"]);
        assert_eq!(entry.format, Format::Unset);
        assert!(entry.values().is_empty());
        assert_eq!(entry.description, "\n{ , }\n{|}");
    }

    #[test]
    fn test_block_without_values_is_description() {
        let (entry, extractor) = run(&["{ ,", "| }"]);
        assert!(!extractor.is_open());
        assert_eq!(entry.format, Format::Unset);
        assert_eq!(entry.description, "\n{ ,\n| }");
    }

    #[test]
    fn test_empty_braces_leave_format_unset() {
        let (entry, _) = run(&["{}", "{ }"]);
        assert_eq!(entry.format, Format::Unset);
        assert!(entry.description.is_empty());

        let (entry, _) = run(&["Format: <int>", "{}"]);
        assert_eq!(entry.format, Format::Literal("<int>".into()));
    }

    #[test]
    fn test_parse_values_drops_empty_pieces() {
        assert_eq!(parse_values(&["{ a, , b, }"]), ["a", "b"]);
    }
}
