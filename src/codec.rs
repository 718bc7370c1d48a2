// Shared base64 handling for keys and signature documents.

use base64::{engine::general_purpose, Engine as _};

/// Decodes standard base64, skipping `\r` and `\n` the way minisign tooling
/// tolerates line breaks inside encoded fields. Returns `None` unless the
/// result is exactly `N` bytes.
pub(crate) fn decode_exact<const N: usize>(text: &str) -> Option<[u8; N]> {
    let cleaned: String = text.chars().filter(|c| *c != '\r' && *c != '\n').collect();
    let bytes = general_purpose::STANDARD.decode(cleaned).ok()?;
    bytes.try_into().ok()
}

/// Copies `N` bytes starting at `offset`. Callers pass a buffer whose length
/// has already been validated.
pub(crate) fn field<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

/// Key id as minisign prints it: little-endian, 16 upper-case hex digits.
pub(crate) fn key_id_hex(key_id: &[u8; 8]) -> String {
    format!("{:016X}", u64::from_le_bytes(*key_id))
}
