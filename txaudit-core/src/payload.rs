//! Tolerant JSON payload extraction from decrypted log bytes.
//!
//! Decrypted blobs are JSON objects surrounded by noise: storage
//! padding before the object, cipher padding after it. Extraction is a
//! documented heuristic, not a parser: lossy-decode, find the first
//! `{`, then try candidate end positions from longest to shortest until
//! one parses. Worst case that is O(n) parse attempts of O(n) each, so
//! O(n²) over the blob — fine for the small payloads these logs carry.

use serde_json::{Map, Value};

/// Name of the monetary field inside an extracted payload.
const AMOUNT_FIELD: &str = "amount";

/// Best-effort recovery of a JSON object from noisy decrypted bytes.
///
/// Invalid UTF-8 is replaced rather than rejected, so this never fails
/// on garbage input. Returns `None` when the blob contains no `{` or no
/// candidate substring parses as a JSON object.
///
/// The longest-prefix-first scan means an object followed by trailing
/// garbage is recovered exactly, without knowing the garbage length in
/// advance.
#[must_use]
pub fn extract_object(blob: &[u8]) -> Option<Map<String, Value>> {
    let text = String::from_utf8_lossy(blob);
    let start = text.find('{')?;
    for end in (start + 1..=text.len()).rev() {
        if !text.is_char_boundary(end) {
            continue;
        }
        if let Ok(Value::Object(object)) = serde_json::from_str(&text[start..end]) {
            return Some(object);
        }
    }
    None
}

/// Reads the monetary amount out of an extracted payload.
///
/// A missing field contributes `0.0`. A present but non-numeric field
/// is treated the same way, with a warning: the manifest row still
/// verified, so the row is counted as zero rather than failed.
#[must_use]
pub fn amount_of(object: &Map<String, Value>) -> f64 {
    match object.get(AMOUNT_FIELD) {
        None => 0.0,
        Some(value) => value.as_f64().unwrap_or_else(|| {
            tracing::warn!(%value, "non-numeric amount field, counting as zero");
            0.0
        }),
    }
}
