//! Rough token counting for cost estimates

use crate::error::{CatalogError, Result};
use std::path::Path;

/// Number of whitespace-separated words in `text`
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn count_tokens_in_file(path: &Path) -> Result<usize> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    Ok(count_tokens(&String::from_utf8_lossy(&bytes)))
}
