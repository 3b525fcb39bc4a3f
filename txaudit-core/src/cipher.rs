//! Repeating-key XOR stream cipher.
//!
//! This is the transform the log files were stored with. It is
//! self-inverse and length-preserving, and it is *not* a real cipher:
//! it provides obfuscation, not confidentiality.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AuditError, AuditResult};

/// Key material for [`xor_transform`].
///
/// Non-empty by construction: an empty key would make the transform a
/// no-op, so [`SecretKey::new`] rejects it up front rather than letting
/// every call site re-check. The bytes are zeroized when the key is
/// dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wraps raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::EmptyKey`] if `bytes` is empty.
    pub fn new(bytes: Vec<u8>) -> AuditResult<Self> {
        if bytes.is_empty() {
            return Err(AuditError::EmptyKey);
        }
        Ok(Self(bytes))
    }

    /// Returns the key bytes. Guaranteed non-empty.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        write!(f, "SecretKey(<{} bytes redacted>)", self.0.len())
    }
}

/// Applies the repeating-key XOR transform.
///
/// Byte `i` of the output is `data[i] ^ key[i % key.len()]`. Applying
/// the transform twice with the same key returns the original data.
#[must_use]
pub fn xor_transform(data: &[u8], key: &SecretKey) -> Vec<u8> {
    let key = key.as_bytes();
    data.iter()
        .enumerate()
        .map(|(i, &byte)| byte ^ key[i % key.len()])
        .collect()
}
