//! Parsed parameter model.

use std::collections::HashMap;
use std::fmt;

/// Expected value syntax of an entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// No format was given.
    #[default]
    Unset,
    /// A type token such as `<int>` or free text describing the syntax.
    Literal(String),
    /// An explicit list of accepted values.
    Enum(Vec<String>),
    /// Presence-only parameter.
    Flag,
    /// Parameter made of nested sub-parameters.
    Complex,
}

impl Format {
    /// The textual marker: `""`, the literal text, `"enum"`, `"flag"` or `"complex"`.
    pub fn as_str(&self) -> &str {
        match self {
            Format::Unset => "",
            Format::Literal(s) => s,
            Format::Enum(_) => "enum",
            Format::Flag => "flag",
            Format::Complex => "complex",
        }
    }

    /// Enumerated values; empty unless this is `Format::Enum`.
    pub fn values(&self) -> &[String] {
        match self {
            Format::Enum(values) => values,
            _ => &[],
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Format::Unset)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented parameter or sub-parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Bracketed applicability tags, `None` when the header had none.
    pub flags: Option<Vec<String>>,
    pub format: Format,
    pub description: String,
    /// Nested entries. Always empty below the top level.
    pub children: EntryMap,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Enumerated values; see [`Format::values`].
    pub fn values(&self) -> &[String] {
        self.format.values()
    }

    /// First line of the description, if any.
    pub fn summary(&self) -> Option<&str> {
        self.description
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Insertion-ordered map from entry name to entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryMap {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its name.
    ///
    /// If the name is already present the old entry is returned and the new
    /// one takes over its slot, so iteration order follows first insertion.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        match self.index.get(&entry.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], entry)),
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl IntoIterator for EntryMap {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntryMap {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for EntryMap {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut map = EntryMap::new();
        for entry in iter {
            map.insert(entry);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_markers() {
        assert_eq!(Format::Unset.as_str(), "");
        assert_eq!(Format::Literal("<int>".into()).as_str(), "<int>");
        assert_eq!(Format::Enum(vec!["on".into()]).as_str(), "enum");
        assert_eq!(Format::Flag.as_str(), "flag");
        assert_eq!(Format::Complex.to_string(), "complex");
    }

    #[test]
    fn test_values_only_for_enum() {
        assert_eq!(Format::Enum(vec!["a".into(), "b".into()]).values(), ["a", "b"]);
        assert!(Format::Literal("{a}".into()).values().is_empty());
        assert!(Format::Flag.values().is_empty());
    }

    #[test]
    fn test_insert_keeps_order() {
        let map: EntryMap = ["zeta", "alpha", "mid"].into_iter().map(Entry::new).collect();
        assert_eq!(map.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = EntryMap::new();
        map.insert(Entry::new("a"));
        map.insert(Entry::new("b"));
        let mut second = Entry::new("a");
        second.description = "second".into();
        let old = map.insert(second).unwrap();
        assert!(old.description.is_empty());
        assert_eq!(map.len(), 2);
        assert_eq!(map.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a").unwrap().description, "second");
    }

    #[test]
    fn test_summary() {
        let mut entry = Entry::new("x");
        assert_eq!(entry.summary(), None);
        entry.description = "\n  First line.\nSecond.".into();
        assert_eq!(entry.summary(), Some("First line."));
    }
}
