//! TOML transcoding: one parameter database document per entry.
//!
//! Document layout:
//!   - `title`        first description line, or the name
//!   - `name`         entry name
//!   - `processor`    boot component consuming the parameter
//!   - `selectors`    applicability flags (only when present)
//!   - `description`  full description text
//!   - `[syntax]`     `type`, `format`, `choices`, `allow_empty`
//!
//! Mapping from format to syntax:
//!   - Format::Flag        -> type "flag",    allow_empty
//!   - Format::Complex     -> type "complex"
//!   - Format::Enum        -> type "enum",    choices = values
//!   - Format::Literal     -> type "integer" for integer tokens, else "string"
//!   - Format::Unset       -> type "string",  allow_empty

use libkparams::{Entry, Format};
use toml_edit::{value, Array, DocumentMut, Item, Table};

/// Literal format tokens that denote a plain integer.
const INTEGER_TOKENS: &[&str] = &["<int>", "<integer>", "<n>", "<uint>", "<nr>"];

/// The `[syntax]` table of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax<'a> {
    pub kind: &'static str,
    pub format: &'a str,
    pub choices: &'a [String],
    pub allow_empty: bool,
}

/// Derive the syntax description from an entry format.
pub fn syntax(format: &Format) -> Syntax<'_> {
    let (kind, allow_empty) = match format {
        Format::Flag => ("flag", true),
        Format::Complex => ("complex", false),
        Format::Enum(_) => ("enum", false),
        Format::Literal(s) if INTEGER_TOKENS.contains(&s.to_ascii_lowercase().as_str()) => {
            ("integer", false)
        }
        Format::Literal(_) => ("string", false),
        Format::Unset => ("string", true),
    };
    Syntax {
        kind,
        format: format.as_str(),
        choices: format.values(),
        allow_empty,
    }
}

/// Encode one entry as a TOML document. Sub-parameters are not included;
/// they get documents of their own.
pub fn encode_entry(entry: &Entry, processor: &str) -> DocumentMut {
    let mut doc = DocumentMut::new();
    doc["title"] = value(entry.summary().unwrap_or(&entry.name));
    doc["name"] = value(entry.name.as_str());
    doc["processor"] = value(processor);
    if let Some(flags) = &entry.flags {
        doc["selectors"] = value(string_array(flags));
    }
    doc["description"] = value(entry.description.as_str());
    doc["syntax"] = Item::Table(syntax_table(&syntax(&entry.format)));
    doc
}

fn syntax_table(syntax: &Syntax<'_>) -> Table {
    let mut table = Table::new();
    table["type"] = value(syntax.kind);
    table["format"] = value(syntax.format);
    table["choices"] = value(string_array(syntax.choices));
    table["allow_empty"] = value(syntax.allow_empty);
    table
}

fn string_array(items: &[String]) -> Array {
    items.iter().map(String::as_str).collect()
}
