//! Manifest loading and row verification.
//!
//! The manifest is the source of truth for which log files are
//! considered authentic: one CSV row per logged transaction, with the
//! expected fingerprint token alongside the identifier.

use std::path::Path;

use serde::Deserialize;

use crate::error::{AuditError, AuditResult};
use crate::fingerprint::encode_fingerprint;

/// Columns every manifest must carry.
const REQUIRED_COLUMNS: [&str; 2] = ["transaction_id", "verification_hash"];

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestRow {
    /// Identifier of the logged transaction; also names the log file.
    pub transaction_id: String,
    /// Expected base-62 fingerprint of `transaction_id`.
    pub verification_hash: String,
}

impl ManifestRow {
    /// Whether this row's stored hash matches the computed fingerprint.
    ///
    /// Exact string equality, no normalization: a mismatch means "not a
    /// log we trust", and the row is filtered out silently.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        encode_fingerprint(&self.transaction_id) == self.verification_hash
    }
}

/// Loads the manifest, preserving row order.
///
/// The header row is validated up front: a missing required column
/// fails fast with [`AuditError::MissingColumn`] before any row is
/// deserialized. Extra columns are ignored.
///
/// # Errors
///
/// Fails if the file cannot be opened, a required column is absent, or
/// any row fails to deserialize.
pub fn load_manifest(path: &Path) -> AuditResult<Vec<ManifestRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    for name in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == name) {
            return Err(AuditError::MissingColumn { name });
        }
    }
    reader
        .deserialize()
        .collect::<Result<Vec<ManifestRow>, _>>()
        .map_err(Into::into)
}
