//! Header line splitting.
//!
//! A header looks like `name[=hint] [FLAG,FLAG] description start`.

use crate::error::{ParseError, Result};

/// Inline format directive prefix.
pub const FORMAT_PREFIX: &str = "Format: ";

/// `sdw_mclk_divider` glues its flags onto the name (`sdw_mclk_divider=[SDW]`).
const SDW_NAME: &str = "sdw_mclk_divider";
const SDW_HINT: &str = "[SDW]";
const SDW_FORMAT: &str = "<int>";

/// The pieces of a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub name: &'a str,
    pub flags: Option<Vec<String>>,
    /// Format from `name=hint` or an inline `Format:` directive.
    pub hint: Option<&'a str>,
    pub description: &'a str,
}

/// Split a header line (indentation already removed).
///
/// Errors carry no location; the caller adds it.
pub fn parse_header(text: &str) -> Result<Header<'_>> {
    let text = text.trim();
    let (first, rest) = split_token(text);
    let (name, hint) = match first.split_once('=') {
        Some((name, hint)) => (name, Some(hint).filter(|h| !h.is_empty())),
        None => (first, None),
    };

    if name.is_empty() {
        return Err(ParseError::MalformedHeader(text.to_string(), String::new()));
    }

    if name == SDW_NAME && hint == Some(SDW_HINT) {
        return Ok(Header {
            name,
            flags: Some(parse_flags(SDW_HINT)),
            hint: Some(SDW_FORMAT),
            description: rest,
        });
    }

    let (token, after) = split_token(rest);
    let (flags, description) = if is_flags_token(token) {
        (Some(parse_flags(token)), after)
    } else {
        (None, rest)
    };

    match inline_format(description) {
        Some(format) => Ok(Header {
            name,
            flags,
            hint: Some(format),
            description: "",
        }),
        None => Ok(Header {
            name,
            flags,
            hint,
            description,
        }),
    }
}

/// Split off the first whitespace-delimited token; the rest is trimmed.
fn split_token(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (text, ""),
    }
}

fn is_flags_token(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('[') && token.ends_with(']')
}

/// Split a `[A,B,C]` token into its tags.
pub fn parse_flags(token: &str) -> Vec<String> {
    token
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .filter(|flag| !flag.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Format: <int>` without braces; brace forms are left to the extractor.
fn inline_format(description: &str) -> Option<&str> {
    let format = description.strip_prefix(FORMAT_PREFIX)?.trim();
    if format.is_empty() || format.contains(['{', '}']) {
        return None;
    }
    Some(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hint_flags_description() {
        let h = parse_header("acpi_sleep=\t[HW,ACPI] Sleep options").unwrap();
        assert_eq!(h.name, "acpi_sleep");
        assert_eq!(h.hint, None);
        assert_eq!(h.flags, Some(vec!["HW".to_string(), "ACPI".to_string()]));
        assert_eq!(h.description, "Sleep options");
    }

    #[test]
    fn test_hint_after_equals() {
        let h = parse_header("pci=option[,option...]\t[PCI,EARLY] various PCI subsystem options.")
            .unwrap();
        assert_eq!(h.name, "pci");
        assert_eq!(h.hint, Some("option[,option...]"));
        assert_eq!(h.description, "various PCI subsystem options.");
    }

    #[test]
    fn test_bare_name() {
        let h = parse_header("nosmp").unwrap();
        assert_eq!(h.name, "nosmp");
        assert_eq!(h.flags, None);
        assert_eq!(h.hint, None);
        assert_eq!(h.description, "");
    }

    #[test]
    fn test_unbracketed_second_token_is_description() {
        let h = parse_header("quiet\t\tDisable most log messages").unwrap();
        assert_eq!(h.flags, None);
        assert_eq!(h.description, "Disable most log messages");
    }

    #[test]
    fn test_inline_format_directive() {
        let h = parse_header("pci=    [PCI] Format: <int>").unwrap();
        assert_eq!(h.name, "pci");
        assert_eq!(h.flags, Some(vec!["PCI".to_string()]));
        assert_eq!(h.hint, Some("<int>"));
        assert_eq!(h.description, "");
    }

    #[test]
    fn test_inline_format_with_braces_stays_description() {
        let h = parse_header("x=\t[KNL] Format: { on | off }").unwrap();
        assert_eq!(h.hint, None);
        assert_eq!(h.description, "Format: { on | off }");
    }

    #[test]
    fn test_sdw_mclk_divider_exception() {
        let h = parse_header("sdw_mclk_divider=[SDW]").unwrap();
        assert_eq!(h.name, "sdw_mclk_divider");
        assert_eq!(h.flags, Some(vec!["SDW".to_string()]));
        assert_eq!(h.hint, Some("<int>"));
        assert_eq!(h.description, "");
    }

    #[test]
    fn test_bracketed_hint_elsewhere_is_a_hint() {
        let h = parse_header("other_divider=[SDW]").unwrap();
        assert_eq!(h.flags, None);
        assert_eq!(h.hint, Some("[SDW]"));
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let err = parse_header("=<int> [KNL]").unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader(ref text, _) if text == "=<int> [KNL]"));
    }

    #[test]
    fn test_parse_flags() {
        assert_eq!(parse_flags("[KNL,BOOT]"), ["KNL", "BOOT"]);
        assert_eq!(parse_flags("[X86-64]"), ["X86-64"]);
        assert!(parse_flags("[]").is_empty());
    }
}
