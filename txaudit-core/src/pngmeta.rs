//! PNG ancillary text metadata reader.
//!
//! The decryption key travels out of band, embedded in the textual
//! metadata of an ordinary PNG image. Only the pieces of the format
//! needed to walk the chunk list and collect `tEXt` fields are
//! implemented here; pixel data is never decoded.
//!
//! # Chunk layout
//!
//! After the 8-byte file signature, a PNG is a sequence of chunks:
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       4     data length (u32 BE)
//! 4       4     chunk type (ASCII, e.g. "tEXt")
//! 8       n     data
//! 8+n     4     crc32 over type + data (u32 BE)
//! ```
//!
//! A `tEXt` chunk's data is `keyword \0 text`, both Latin-1. Parsing
//! stops at the `IEND` chunk.

use std::fs;
use std::path::Path;

use crate::cipher::SecretKey;
use crate::error::{AuditError, AuditResult};

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
/// Uncompressed textual metadata chunk.
const CHUNK_TEXT: &[u8; 4] = b"tEXt";
/// End-of-image chunk.
const CHUNK_END: &[u8; 4] = b"IEND";

/// Metadata field whose value carries the key.
const SOFTWARE_KEYWORD: &str = "Software";
/// Literal marker preceding the key inside the field value.
const KEY_MARKER: &str = "System_Key:";

/// Reads all `tEXt` keyword/value pairs from a PNG file, in file order.
///
/// # Errors
///
/// Fails if the file cannot be read, does not carry the PNG signature,
/// is truncated mid-chunk, or contains a chunk whose CRC32 does not
/// match.
pub fn read_text_metadata(path: &Path) -> AuditResult<Vec<(String, String)>> {
    let bytes = fs::read(path).map_err(|source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_text_chunks(&bytes)
}

/// Recovers the shared decryption key from a PNG image asset.
///
/// Looks up the `Software` metadata field and takes everything after
/// the literal `System_Key:` marker, whitespace-trimmed, as UTF-8 key
/// bytes.
///
/// # Errors
///
/// Returns [`AuditError::KeyNotFound`] when the field or marker is
/// absent, or when nothing but whitespace follows the marker. An empty
/// key is never returned: it would make the stream cipher a no-op and
/// silently mask the misconfiguration.
pub fn recover_key(path: &Path) -> AuditResult<SecretKey> {
    let fields = read_text_metadata(path)?;
    let software = fields
        .iter()
        .find_map(|(keyword, value)| (keyword == SOFTWARE_KEYWORD).then_some(value.as_str()))
        .ok_or(AuditError::KeyNotFound)?;
    let marker_at = software.find(KEY_MARKER).ok_or(AuditError::KeyNotFound)?;
    let key = software[marker_at + KEY_MARKER.len()..].trim();
    if key.is_empty() {
        tracing::error!(field = SOFTWARE_KEYWORD, "key marker present but key is empty");
        return Err(AuditError::KeyNotFound);
    }
    SecretKey::new(key.as_bytes().to_vec())
}

/// Walks the chunk list and collects `tEXt` keyword/value pairs.
fn parse_text_chunks(bytes: &[u8]) -> AuditResult<Vec<(String, String)>> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(AuditError::InvalidMagic {
            found: bytes[..bytes.len().min(PNG_SIGNATURE.len())].to_vec(),
        });
    }

    let mut fields = Vec::new();
    let mut offset = PNG_SIGNATURE.len();
    loop {
        let header = bytes
            .get(offset..offset + 8)
            .ok_or_else(|| AuditError::UnexpectedEof {
                context: "chunk header".to_string(),
            })?;
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let chunk_type = &header[4..8];
        let type_name = String::from_utf8_lossy(chunk_type).into_owned();

        let data_end = offset + 8 + length;
        let data = bytes
            .get(offset + 8..data_end)
            .ok_or_else(|| AuditError::UnexpectedEof {
                context: format!("{type_name} chunk data"),
            })?;
        let crc = bytes
            .get(data_end..data_end + 4)
            .ok_or_else(|| AuditError::UnexpectedEof {
                context: format!("{type_name} chunk crc"),
            })?;

        let stored_crc = u32::from_be_bytes([crc[0], crc[1], crc[2], crc[3]]);
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(chunk_type);
        hasher.update(data);
        if hasher.finalize() != stored_crc {
            return Err(AuditError::ChecksumMismatch {
                context: format!("{type_name} chunk"),
            });
        }

        if chunk_type == CHUNK_END {
            break;
        }
        if chunk_type == CHUNK_TEXT {
            // keyword \0 text; a chunk without the separator is ignored.
            if let Some(nul) = data.iter().position(|&b| b == 0) {
                fields.push((latin1(&data[..nul]), latin1(&data[nul + 1..])));
            }
        }
        offset = data_end + 4;
    }
    Ok(fields)
}

/// Decodes Latin-1 bytes (each byte is the code point).
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
