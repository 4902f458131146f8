//! YAML transcoding: render a parsed document as a YAML mapping.
//!
//! Mapping from entries to YAML:
//!   - EntryMap        -> mapping keyed by entry name, in document order
//!   - Entry.format    -> `format` string
//!   - Entry.flags     -> `flags` sequence (only when present)
//!   - Entry.values    -> `values` sequence (only for enums)
//!   - Entry.children  -> `children` mapping (only when present)

use libkparams::{Entry, EntryMap};
use serde_yaml::{Mapping, Value};

/// Encode a parsed document as a YAML string.
pub fn encode(entries: &EntryMap) -> Result<String, String> {
    serde_yaml::to_string(&entries_to_yaml(entries)).map_err(|e| format!("YAML encode error: {}", e))
}

fn entries_to_yaml(entries: &EntryMap) -> Value {
    let mut map = Mapping::new();
    for entry in entries {
        map.insert(Value::String(entry.name.clone()), entry_to_yaml(entry));
    }
    Value::Mapping(map)
}

fn entry_to_yaml(entry: &Entry) -> Value {
    let mut map = Mapping::new();
    map.insert("format".into(), entry.format.as_str().into());
    if let Some(flags) = &entry.flags {
        map.insert("flags".into(), string_seq(flags));
    }
    if !entry.values().is_empty() {
        map.insert("values".into(), string_seq(entry.values()));
    }
    map.insert("description".into(), entry.description.as_str().into());
    if !entry.children.is_empty() {
        map.insert("children".into(), entries_to_yaml(&entry.children));
    }
    Value::Mapping(map)
}

fn string_seq(items: &[String]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::String(s.clone())).collect())
}
