//! Phase 3: Entry state machine
//!
//! Lines are routed by their classification against the entries that are
//! currently open. An entry is committed to its parent map when a sibling
//! or ancestor header starts, or when the input ends.

use std::io::BufRead;
use std::mem;

use log::Level;

use crate::entry::{Entry, EntryMap, Format};
use crate::error::{DuplicatePolicy, ParseContext, ParseError, Result};
use crate::extract::{Extracted, Extractor};
use crate::header::{parse_header, Header};
use crate::scanner::{classify, Depth, LineKind};

/// A top-level entry being built, with its value block state.
#[derive(Debug)]
struct OpenTop {
    entry: Entry,
    extractor: Extractor,
    line: usize,
}

/// A sub-parameter being built.
#[derive(Debug)]
struct OpenNested {
    entry: Entry,
    line: usize,
}

/// Which entries are open. A sub-parameter cannot be open without its parent.
#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Top(OpenTop),
    Nested { top: OpenTop, nested: OpenNested },
}

/// Line-at-a-time parser over a parameter document.
pub struct Parser<'a> {
    ctx: ParseContext<'a>,
    state: State,
    entries: EntryMap,
    line_num: usize,
}

impl<'a> Parser<'a> {
    pub fn new(ctx: ParseContext<'a>) -> Self {
        Self {
            ctx,
            state: State::Idle,
            entries: EntryMap::new(),
            line_num: 0,
        }
    }

    /// Feed the next line, without its line terminator.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        let kind = classify(line);
        let state = mem::take(&mut self.state);
        self.state = match (kind, state) {
            (LineKind::Blank, State::Top(mut top)) => {
                top.entry.description.push('\n');
                State::Top(top)
            }
            (LineKind::Blank, State::Nested { top, mut nested }) => {
                nested.entry.description.push('\n');
                State::Nested { top, nested }
            }
            (LineKind::TopHeader(text), state) => {
                self.close(state)?;
                let entry = self.open(text)?;
                self.debug(format_args!("open parameter {}", entry.name));
                State::Top(OpenTop {
                    entry,
                    extractor: Extractor::new(),
                    line: self.line_num,
                })
            }
            (LineKind::NestedHeader(text), State::Top(top)) => {
                let nested = self.open_nested(&top, text)?;
                State::Nested { top, nested }
            }
            (LineKind::NestedHeader(text), State::Nested { mut top, nested }) => {
                self.commit_nested(&mut top, nested)?;
                let nested = self.open_nested(&top, text)?;
                State::Nested { top, nested }
            }
            (LineKind::NestedHeader(text), State::Idle) => {
                self.debug(format_args!("sub-parameter outside any parameter: {}", text));
                State::Idle
            }
            (LineKind::Continuation(Depth::Three, text), State::Top(mut top)) => {
                let outcome = top.extractor.feed(&mut top.entry, text);
                match outcome {
                    Extracted::BlockOpened => self.trace(format_args!("value block opened")),
                    Extracted::Values => self.trace(format_args!(
                        "{} values for {}",
                        top.entry.values().len(),
                        top.entry.name
                    )),
                    _ => {}
                }
                State::Top(top)
            }
            (LineKind::Continuation(_, text), State::Nested { top, mut nested }) => {
                push_line(&mut nested.entry.description, text);
                State::Nested { top, nested }
            }
            (LineKind::Continuation(Depth::Four, text), state @ State::Top(_)) => {
                self.trace(format_args!("no sub-parameter open, dropping: {}", text));
                state
            }
            (LineKind::Ignored, state) => {
                if !line.trim().is_empty() {
                    self.trace(format_args!("ignored line"));
                }
                state
            }
            (_, state) => state,
        };
        self.line_num += 1;
        Ok(())
    }

    /// Flush the open entries and return the result.
    pub fn finish(mut self) -> Result<EntryMap> {
        let state = mem::take(&mut self.state);
        self.close(state)?;
        Ok(self.entries)
    }

    /// Open an entry from header text.
    fn open(&self, text: &str) -> Result<Entry> {
        let Header {
            name,
            flags,
            hint,
            description,
        } = parse_header(text).map_err(|e| e.with_location(&self.ctx, self.line_num))?;

        Ok(Entry {
            name: name.to_string(),
            flags,
            format: hint.map_or(Format::Unset, |h| Format::Literal(h.to_string())),
            description: description.to_string(),
            children: EntryMap::new(),
        })
    }

    fn open_nested(&self, top: &OpenTop, text: &str) -> Result<OpenNested> {
        let entry = self.open(text)?;
        self.debug(format_args!(
            "open sub-parameter {}.{}",
            top.entry.name, entry.name
        ));
        Ok(OpenNested {
            entry,
            line: self.line_num,
        })
    }

    /// Commit whatever is open, innermost first.
    fn close(&mut self, state: State) -> Result<()> {
        match state {
            State::Idle => Ok(()),
            State::Top(top) => self.commit_top(top),
            State::Nested { mut top, nested } => {
                self.commit_nested(&mut top, nested)?;
                self.commit_top(top)
            }
        }
    }

    fn commit_nested(&self, top: &mut OpenTop, nested: OpenNested) -> Result<()> {
        let OpenNested { mut entry, line } = nested;
        trim_leading_blank_lines(&mut entry.description);
        self.debug(format_args!(
            "commit sub-parameter {}.{}",
            top.entry.name, entry.name
        ));
        if top.entry.children.contains(&entry.name) {
            self.duplicate(&format!("{}.{}", top.entry.name, entry.name), line)?;
        }
        top.entry.children.insert(entry);
        Ok(())
    }

    fn commit_top(&mut self, top: OpenTop) -> Result<()> {
        let OpenTop {
            mut entry,
            mut extractor,
            line,
        } = top;
        if extractor.is_open() {
            self.trace(format_args!("unterminated value block in {}", entry.name));
            extractor.flush(&mut entry);
        }
        if entry.format.is_unset() {
            entry.format = if entry.children.is_empty() {
                Format::Flag
            } else {
                Format::Complex
            };
        }
        trim_leading_blank_lines(&mut entry.description);
        self.debug(format_args!(
            "commit parameter {} ({})",
            entry.name, entry.format
        ));
        if self.entries.contains(&entry.name) {
            self.duplicate(&entry.name, line)?;
        }
        self.entries.insert(entry);
        Ok(())
    }

    /// Apply the duplicate policy to a name whose header is at `line`.
    fn duplicate(&self, name: &str, line: usize) -> Result<()> {
        match self.ctx.duplicates() {
            DuplicatePolicy::Replace => {
                self.ctx.log(
                    Level::Warn,
                    line,
                    format_args!("duplicate parameter {}, keeping the later one", name),
                );
                Ok(())
            }
            DuplicatePolicy::Reject => Err(ParseError::DuplicateName(
                name.to_string(),
                String::new(),
            )
            .with_location(&self.ctx, line)),
        }
    }

    fn debug(&self, args: std::fmt::Arguments<'_>) {
        self.ctx.log(Level::Debug, self.line_num, args);
    }

    fn trace(&self, args: std::fmt::Arguments<'_>) {
        self.ctx.log(Level::Trace, self.line_num, args);
    }
}

fn push_line(description: &mut String, line: &str) {
    description.push('\n');
    description.push_str(line);
}

fn trim_leading_blank_lines(description: &mut String) {
    let blank = description.len() - description.trim_start_matches('\n').len();
    description.replace_range(..blank, "");
}

/// Parse a whole document held in memory.
pub fn parse_document(input: &str, ctx: &ParseContext<'_>) -> Result<EntryMap> {
    let mut parser = Parser::new(*ctx);
    for line in input.lines() {
        parser.feed(line)?;
    }
    parser.finish()
}

/// Parse a document from a reader, line by line.
pub fn parse_reader<R: BufRead>(reader: R, ctx: &ParseContext<'_>) -> Result<EntryMap> {
    let mut parser = Parser::new(*ctx);
    for line in reader.lines() {
        let line = line.map_err(ParseError::Io)?;
        parser.feed(&line)?;
    }
    parser.finish()
}
