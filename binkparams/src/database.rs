//! Per-parameter database layout on disk.
//!
//! Every entry becomes `<outdir>/<name>/parameter.toml`; sub-parameters
//! nest under their parent's directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use libkparams::{Entry, EntryMap};

use crate::transcode::toml::encode_entry;

pub const DOCUMENT_NAME: &str = "parameter.toml";

/// Write one document per entry under `outdir`, returning how many
/// documents were written.
pub fn write_database(entries: &EntryMap, outdir: &Path, processor: &str) -> Result<usize> {
    fs::create_dir_all(outdir)
        .with_context(|| format!("cannot create {}", outdir.display()))?;
    let mut written = 0;
    for entry in entries {
        written += write_entry(entry, outdir, processor)?;
    }
    Ok(written)
}

fn write_entry(entry: &Entry, parent: &Path, processor: &str) -> Result<usize> {
    let dir = parent.join(dir_name(&entry.name));
    fs::create_dir_all(&dir).with_context(|| format!("cannot create {}", dir.display()))?;

    let path = dir.join(DOCUMENT_NAME);
    fs::write(&path, encode_entry(entry, processor).to_string())
        .with_context(|| format!("cannot write {}", path.display()))?;
    log::debug!("wrote {}", path.display());

    let mut written = 1;
    for child in &entry.children {
        written += write_entry(child, &dir, processor)?;
    }
    Ok(written)
}

/// Directory name for an entry. Path separators are not allowed in a
/// single component.
pub fn dir_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}
