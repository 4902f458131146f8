//! Human-readable listing of a parsed document.
//!
//! Each entry renders as a `Name:`/`Format:`/`Flags:`/`Values:`/`Desc:`
//! block followed by a blank line. Sub-parameters follow their parent,
//! indented by four spaces.

use crate::entry::{Entry, EntryMap};

const INDENT: &str = "    ";

/// Render every entry in document order.
pub fn dump(entries: &EntryMap) -> String {
    let mut out = String::new();
    for entry in entries {
        dump_entry(&mut out, entry, 0);
    }
    out
}

fn dump_entry(out: &mut String, entry: &Entry, depth: usize) {
    let flags = entry.flags.as_deref().unwrap_or_default().join(", ");

    let mut block = String::new();
    field(&mut block, "Name", &entry.name);
    field(&mut block, "Format", entry.format.as_str());
    field(&mut block, "Flags", &flags);
    field(&mut block, "Values", &entry.values().join(", "));
    field(&mut block, "Desc", &entry.description);
    block.push('\n');

    if depth == 0 {
        out.push_str(&block);
    } else {
        let prefix = INDENT.repeat(depth);
        for line in block.split_inclusive('\n') {
            if line != "\n" {
                out.push_str(&prefix);
            }
            out.push_str(line);
        }
    }

    for child in &entry.children {
        dump_entry(out, child, depth + 1);
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push(':');
    if !value.is_empty() {
        out.push(' ');
        out.push_str(value);
    }
    out.push('\n');
}
