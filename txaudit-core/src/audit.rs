//! The audit driver: orchestrates verify → read → decrypt → extract
//! over every manifest row and accumulates the total.
//!
//! Control flow is explicit: each row produces a [`RowOutcome`] rather
//! than throwing, and only key recovery and manifest loading can abort
//! the run. One bad or tampered entry never prevents the rest of the
//! manifest from being totalled.

use std::fs;

use crate::cipher::{xor_transform, SecretKey};
use crate::error::AuditResult;
use crate::manifest::{load_manifest, ManifestRow};
use crate::paths::AuditPaths;
use crate::payload::{amount_of, extract_object};
use crate::pngmeta::recover_key;

/// How a single manifest row fared.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Fingerprint mismatch: the expected filtering mechanism, not a
    /// failure. Contributes zero, produces no diagnostic.
    SkippedUnverified,
    /// The log file could not be read. Contributes zero; the caller is
    /// expected to report it.
    ReadFailed {
        /// Path of the log file that failed.
        path: std::path::PathBuf,
        /// The underlying I/O error message.
        message: String,
    },
    /// The decrypted bytes held no extractable JSON object.
    /// Contributes zero.
    NoPayload,
    /// Full success; `amount` was added to the total.
    Credited {
        /// The amount this row contributed (may be zero if the payload
        /// had no numeric `amount` field).
        amount: f64,
    },
}

/// Per-row record of what happened, in manifest order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowReport {
    /// The row's transaction identifier.
    pub transaction_id: String,
    /// What happened to the row.
    pub outcome: RowOutcome,
}

/// Result of a completed audit run.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSummary {
    /// Sum of every credited row's amount.
    pub total: f64,
    /// One report per manifest row, in manifest order.
    pub rows: Vec<RowReport>,
}

impl AuditSummary {
    /// Renders the total rounded to two decimals, ready for the
    /// `TOTAL_AMOUNT:` output line.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format_total(self.total)
    }
}

/// Runs the full audit pipeline once.
///
/// The key is recovered first and exactly once; without it nothing else
/// runs (the manifest is not even opened). Rows are then processed
/// strictly in manifest order, each contributing to the total at most
/// once and only on full verify → read → decrypt → extract success.
///
/// # Errors
///
/// Fails only on the fatal conditions: unrecoverable key or unloadable
/// manifest. Per-row failures are reported in the summary instead.
pub fn run_audit(paths: &AuditPaths) -> AuditResult<AuditSummary> {
    let key = recover_key(paths.image())?;
    let manifest = load_manifest(paths.manifest())?;
    tracing::info!(rows = manifest.len(), "manifest loaded");

    let mut total = 0.0;
    let mut rows = Vec::with_capacity(manifest.len());
    for row in manifest {
        let outcome = process_row(&row, paths, &key);
        if let RowOutcome::Credited { amount } = outcome {
            total += amount;
        }
        rows.push(RowReport {
            transaction_id: row.transaction_id,
            outcome,
        });
    }
    Ok(AuditSummary { total, rows })
}

/// Runs one row through verify → read → decrypt → extract.
fn process_row(row: &ManifestRow, paths: &AuditPaths, key: &SecretKey) -> RowOutcome {
    if !row.is_verified() {
        tracing::debug!(
            transaction_id = %row.transaction_id,
            "fingerprint mismatch, skipping"
        );
        return RowOutcome::SkippedUnverified;
    }

    let path = paths.log_path(&row.transaction_id);
    let ciphertext = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "log file unreadable");
            return RowOutcome::ReadFailed {
                path,
                message: err.to_string(),
            };
        }
    };

    let plaintext = xor_transform(&ciphertext, key);
    match extract_object(&plaintext) {
        None => {
            tracing::warn!(
                transaction_id = %row.transaction_id,
                "no JSON object recovered from decrypted log"
            );
            RowOutcome::NoPayload
        }
        Some(object) => RowOutcome::Credited {
            amount: amount_of(&object),
        },
    }
}

/// Rounds a total to two decimals and renders it for output.
///
/// Rounding rule: half away from zero (`10.005` prints as `10.0` only
/// because of binary representation of the input — the rule itself
/// rounds `.005` up when exactly representable). Rendering uses the
/// shortest decimal form, with `.0` appended to whole numbers so the
/// line always reads as a decimal (`0.0`, `10.5`, `10.01`).
#[must_use]
pub fn format_total(total: f64) -> String {
    let rounded = (total * 100.0).round() / 100.0;
    let mut rendered = format!("{rounded}");
    if !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}
