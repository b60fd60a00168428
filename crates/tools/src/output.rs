//! Catalog output - JSON rendering and collision-free file naming
//!
//! Output files are named after the input with a numeric suffix:
//! `page.txt` becomes `page_1.json`, then `page_2.json`, and so on.
//! An existing file is never overwritten.

use crate::error::{CatalogError, Result};
use catalog_dom::ElementRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const INDENT: &[u8] = b"    ";

/// Render records as a pretty-printed JSON array with 4-space indentation
pub fn render_json(records: &[ElementRecord]) -> Result<String> {
    let mut buf = Vec::with_capacity(records.len() * 160 + 2);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// First `<stem>_N.<extension>` next to `input` that does not exist yet,
/// counting from 1
pub fn unique_output_path(input: &Path, extension: &str) -> PathBuf {
    let base = input.with_extension("");
    let mut counter = 1;
    loop {
        let candidate = numbered_path(&base, counter, extension);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Render `records` and write them next to `input` under a fresh name.
/// Returns the path written.
///
/// A name claimed by someone else between the check and the create is
/// skipped, and a failed write leaves no partial file behind.
pub fn write_catalog(records: &[ElementRecord], input: &Path, extension: &str) -> Result<PathBuf> {
    let json = render_json(records)?;

    loop {
        let path = unique_output_path(input, extension);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                fill_or_discard(file, &path, json.as_bytes())?;
                tracing::info!(
                    "[Output] Wrote {} records ({} bytes) to {}",
                    records.len(),
                    json.len(),
                    path.display()
                );
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("[Output] {} was taken, picking another name", path.display());
            }
            Err(e) => return Err(CatalogError::io(&path, e)),
        }
    }
}

/// Write `bytes` through `writer` into the freshly created `path`, removing
/// `path` again if the write fails
fn fill_or_discard<W: Write>(mut writer: W, path: &Path, bytes: &[u8]) -> Result<()> {
    let outcome = writer.write_all(bytes).and_then(|()| writer.flush());
    drop(writer);

    if let Err(source) = outcome {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("[Output] Could not remove partial {}: {}", path.display(), e);
        }
        return Err(CatalogError::io(path, source));
    }
    Ok(())
}

fn numbered_path(base: &Path, counter: u32, extension: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    if extension.is_empty() {
        name.push(format!("_{}", counter));
    } else {
        name.push(format!("_{}.{}", counter, extension));
    }
    PathBuf::from(name)
}
