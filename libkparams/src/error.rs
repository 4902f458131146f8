//! Error types and parse context.

use std::fmt;

use log::{Level, Log, Record};
use thiserror::Error;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Log target used for every record the parser emits.
pub const LOG_TARGET: &str = "libkparams::parser";

/// What to do when two entries at the same level share a name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later entry replaces the earlier one, keeping its position.
    #[default]
    Replace,
    /// Stop the parse with [`ParseError::DuplicateName`].
    Reject,
}

/// Parse context carrying the filename, duplicate policy and logger.
///
/// The parser never reaches for the process-wide logger on its own; it
/// logs through the `Log` handed in here.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    filename: Option<&'a str>,
    duplicates: DuplicatePolicy,
    logger: &'a dyn Log,
}

impl<'a> ParseContext<'a> {
    /// Create a context that logs through the globally installed logger.
    pub fn new(filename: Option<&'a str>) -> Self {
        Self {
            filename,
            duplicates: DuplicatePolicy::default(),
            logger: log::logger(),
        }
    }

    /// Route parser diagnostics to `logger` instead.
    pub fn with_logger(mut self, logger: &'a dyn Log) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Format a location suffix for error messages. `line` is zero-based.
    pub fn loc_suffix(&self, line: usize) -> String {
        match self.filename {
            Some(name) => format!(" at line {} of <{}>", line + 1, name),
            None => format!(" at line {}", line + 1),
        }
    }

    pub(crate) fn log(&self, level: Level, line: usize, args: fmt::Arguments<'_>) {
        let record = Record::builder()
            .args(args)
            .level(level)
            .target(LOG_TARGET)
            .file(self.filename)
            .line(u32::try_from(line + 1).ok())
            .build();
        if self.logger.enabled(record.metadata()) {
            self.logger.log(&record);
        }
    }
}

impl fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("filename", &self.filename)
            .field("duplicates", &self.duplicates)
            .finish_non_exhaustive()
    }
}

/// Error type for parameter document parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A header line that does not yield a parameter name.
    #[error("Malformed header \"{0}\"{1}")]
    MalformedHeader(String, String),

    /// Two entries at the same level share a name.
    #[error("Duplicate parameter \"{0}\"{1}")]
    DuplicateName(String, String),

    /// The input stream could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext<'_>, line: usize) -> Self {
        let suffix = ctx.loc_suffix(line);
        match self {
            ParseError::MalformedHeader(text, _) => ParseError::MalformedHeader(text, suffix),
            ParseError::DuplicateName(name, _) => ParseError::DuplicateName(name, suffix),
            ParseError::Io(e) => ParseError::Io(e),
        }
    }
}
