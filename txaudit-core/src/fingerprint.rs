//! Base-62 fingerprint encoding for transaction identifiers.
//!
//! A manifest row is trusted iff the base-62 rendering of its
//! `transaction_id` equals the stored `verification_hash`. This is a
//! lightweight tamper check, not a cryptographic hash: the encoding is
//! trivially reversible.

/// Base-62 digit alphabet: `0-9`, then `A-Z`, then `a-z`.
///
/// Must stay in sync with whatever produced the stored verification
/// hashes; this is the conventional ordering.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encodes an identifier as a base-62 fingerprint token.
///
/// The identifier's UTF-8 bytes are interpreted as a single big-endian
/// unsigned integer, which is then rendered in base 62. The conversion
/// is done by repeated long division over the byte string, so
/// identifiers of any length are supported (no fixed-width integer
/// cap).
///
/// The empty string encodes the integer zero and yields `"0"`.
#[must_use]
pub fn encode_fingerprint(identifier: &str) -> String {
    // The value in base 256, most significant byte first. Shrinks as
    // digits are peeled off.
    let mut value: Vec<u8> = identifier.as_bytes().to_vec();
    // Base-62 digits, least significant first.
    let mut digits: Vec<u8> = Vec::new();

    loop {
        let mut quotient: Vec<u8> = Vec::with_capacity(value.len());
        let mut remainder: u32 = 0;
        for &byte in &value {
            let acc = (remainder << 8) | u32::from(byte);
            let q = acc / 62;
            remainder = acc % 62;
            // Drop leading zero limbs so the loop terminates.
            if !(quotient.is_empty() && q == 0) {
                quotient.push(u8::try_from(q).unwrap_or(0));
            }
        }
        digits.push(u8::try_from(remainder).unwrap_or(0));
        if quotient.is_empty() {
            break;
        }
        value = quotient;
    }

    digits
        .iter()
        .rev()
        .map(|&d| char::from(ALPHABET[usize::from(d)]))
        .collect()
}
