//! Core pipeline for auditing encrypted transaction logs.
//!
//! The pipeline is four stages glued together by a driver: fingerprint
//! verification of manifest rows, decryption key recovery from PNG
//! metadata, repeating-key XOR stream decryption, and tolerant JSON
//! payload extraction feeding a running total.
//!
//! The library never prints and never reads global paths: callers hand
//! it an [`AuditPaths`] and receive an [`AuditSummary`] describing
//! every row's fate.

pub mod audit;
pub mod cipher;
pub mod error;
pub mod fingerprint;
pub mod manifest;
pub mod paths;
pub mod payload;
pub mod pngmeta;

pub use audit::{format_total, run_audit, AuditSummary, RowOutcome, RowReport};
pub use cipher::{xor_transform, SecretKey};
pub use error::{AuditError, AuditResult};
pub use fingerprint::encode_fingerprint;
pub use manifest::{load_manifest, ManifestRow};
pub use paths::AuditPaths;
pub use payload::{amount_of, extract_object};
pub use pngmeta::{read_text_metadata, recover_key};
