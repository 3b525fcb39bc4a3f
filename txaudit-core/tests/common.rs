//! Common fixture builders shared across integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&u32::try_from(data.len()).unwrap().to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
    out
}

/// Writes a minimal PNG whose `Software` tEXt field carries the given
/// value (pass the full field value, marker included).
pub fn write_image_with_software(path: &Path, software: &str) {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0]));
    let mut text = b"Software".to_vec();
    text.push(0);
    text.extend_from_slice(software.as_bytes());
    bytes.extend_from_slice(&chunk(b"tEXt", &text));
    bytes.extend_from_slice(&chunk(b"IEND", &[]));
    fs::write(path, bytes).expect("write image");
}

/// Writes a key-bearing image: `Software = System_Key: <key>`.
pub fn write_key_image(path: &Path, key: &str) {
    write_image_with_software(path, &format!("System_Key: {key}"));
}

/// Repeating-key XOR, independent of the implementation under test.
pub fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, &b)| b ^ key[i % key.len()])
        .collect()
}

/// Writes an encrypted log file for `transaction_id` into `logs_dir`.
pub fn write_encrypted_log(logs_dir: &Path, transaction_id: &str, plaintext: &[u8], key: &[u8]) {
    let path = logs_dir.join(format!("{transaction_id}.dat"));
    fs::write(path, xor(plaintext, key)).expect("write log");
}

/// Writes a manifest CSV from `(transaction_id, verification_hash)` pairs.
pub fn write_manifest(path: &Path, rows: &[(&str, &str)]) {
    let mut contents = String::from("transaction_id,verification_hash\n");
    for (id, hash) in rows {
        contents.push_str(&format!("{id},{hash}\n"));
    }
    fs::write(path, contents).expect("write manifest");
}

/// Creates the standard fixture layout inside `root`: a `logs/`
/// directory plus paths for the manifest and image.
pub fn fixture_layout(root: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let logs_dir = root.join("logs");
    fs::create_dir_all(&logs_dir).expect("create logs dir");
    (root.join("manifest.csv"), logs_dir, root.join("server_room.png"))
}
