//! Input path configuration.
//!
//! All three input locations are explicit values handed to the driver,
//! never module-level constants, so tests can point a run at a
//! temporary directory.

use std::path::{Path, PathBuf};

/// Extension of on-disk encrypted log records.
const LOG_EXTENSION: &str = "dat";

/// The three input locations an audit run reads from.
#[derive(Debug, Clone)]
pub struct AuditPaths {
    manifest: PathBuf,
    logs_dir: PathBuf,
    image: PathBuf,
}

impl AuditPaths {
    /// Builds the path set for one run.
    #[must_use]
    pub fn new(
        manifest: impl Into<PathBuf>,
        logs_dir: impl Into<PathBuf>,
        image: impl Into<PathBuf>,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            logs_dir: logs_dir.into(),
            image: image.into(),
        }
    }

    /// Returns the manifest CSV path.
    #[must_use]
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Returns the encrypted logs directory.
    #[must_use]
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Returns the key-bearing image asset path.
    #[must_use]
    pub fn image(&self) -> &Path {
        &self.image
    }

    /// Returns the log file path for a transaction:
    /// `<logs_dir>/<transaction_id>.dat`.
    #[must_use]
    pub fn log_path(&self, transaction_id: &str) -> PathBuf {
        self.logs_dir
            .join(format!("{transaction_id}.{LOG_EXTENSION}"))
    }
}
