//! Utility functions for text handling

/// Marker appended to capped text
pub const ELLIPSIS: &str = "...";

/// Cap text length to avoid token explosion
///
/// Lengths count chars, so a multi-byte character is never split.
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}

/// Whether `name` is in `allowed`, for config lists held as owned strings
pub(crate) fn contains_name(allowed: &[String], name: &str) -> bool {
    allowed.iter().any(|candidate| candidate == name)
}
