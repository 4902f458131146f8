//! Parser for the tab-indented `kernel-parameters.txt` document format.
//!
//! The document lists parameters one per header line, indented by one tab,
//! with format hints, value lists and description text on deeper lines:
//!
//! ```text
//! <TAB>acpi_sleep=<TAB>[HW,ACPI] Sleep options
//! <TAB><TAB><TAB>Format: { s3_bios, s3_mode, s3_beep, s4_hwsig,
//! <TAB><TAB><TAB>  s4_nohwsig, old_rtc, nonvs, sci_force_enable, nobl }
//! ```
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: classifies every line by indentation depth and first
//!    character (header, sub-parameter header, continuation, blank).
//!
//! 2. **Extractor**: turns continuation lines of a parameter into a format,
//!    an enumerated value list, or description text.
//!
//! 3. **Parser**: a state machine over the open parameter and
//!    sub-parameter that commits finished entries into an [`EntryMap`].
//!
//! Parsing never rejects content; the only failures are header lines
//! without a name, duplicate names under [`DuplicatePolicy::Reject`], and
//! I/O errors from [`parse_reader`].

mod dump;
mod entry;
mod error;
mod extract;
mod header;
mod parser;
mod scanner;

use std::io::BufRead;

pub use dump::dump;
pub use entry::{Entry, EntryMap, Format};
pub use error::{DuplicatePolicy, ParseContext, ParseError, Result, LOG_TARGET};
pub use parser::Parser;

/// Parse a parameter document from a string.
///
/// # Example
///
/// ```
/// use libkparams::parse;
///
/// let entries = parse("\tnosmp\t\t[SMP] Run as a UP kernel.\n").unwrap();
/// assert_eq!(entries.get("nosmp").unwrap().format.as_str(), "flag");
/// ```
pub fn parse(input: &str) -> Result<EntryMap> {
    parse_with_context(input, &ParseContext::new(None))
}

/// Parse a parameter document with an explicit context.
pub fn parse_with_context(input: &str, ctx: &ParseContext<'_>) -> Result<EntryMap> {
    parser::parse_document(input, ctx)
}

/// Parse a parameter document from a reader.
pub fn parse_reader<R: BufRead>(reader: R, ctx: &ParseContext<'_>) -> Result<EntryMap> {
    parser::parse_reader(reader, ctx)
}
