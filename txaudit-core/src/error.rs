//! Error types for the audit pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors raised by the audit pipeline.
///
/// Only the fatal conditions live here: per-row failures (an unreadable
/// log file, an unparseable payload) are represented as row outcomes by
/// the driver and never abort the run.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A required input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The image asset does not start with the PNG signature.
    #[error("not a PNG file: bad signature {found:02x?}")]
    InvalidMagic {
        /// The bytes found where the signature was expected.
        found: Vec<u8>,
    },

    /// The image asset ended mid-structure.
    #[error("unexpected end of file: {context}")]
    UnexpectedEof {
        /// Which structure was being read.
        context: String,
    },

    /// A PNG chunk failed its CRC32 check.
    #[error("checksum mismatch: {context}")]
    ChecksumMismatch {
        /// Which chunk failed.
        context: String,
    },

    /// The metadata field or the key marker inside it is absent.
    ///
    /// Deliberately not recoverable as an empty key: an empty key would
    /// turn the stream cipher into a no-op and mask the failure.
    #[error("decryption key not found in image metadata")]
    KeyNotFound,

    /// An empty key was presented to [`crate::cipher::SecretKey::new`].
    #[error("decryption key must not be empty")]
    EmptyKey,

    /// The manifest could not be read or deserialized.
    #[error("manifest error: {0}")]
    Manifest(#[from] csv::Error),

    /// The manifest header row lacks a required column.
    #[error("manifest is missing required column `{name}`")]
    MissingColumn {
        /// Name of the absent column.
        name: &'static str,
    },
}
