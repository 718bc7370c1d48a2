//! Minisign public keys.
//!
//! A key is one base64 token over `algorithm[2] ‖ key_id[8] ‖ key[32]`.

use std::fs;
use std::path::Path;

use crate::codec;
use crate::error::{Error, FormatError};

pub const PUBLIC_KEY_LEN: usize = 2 + 8 + 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub signature_algorithm: [u8; 2],
    pub key_id: [u8; 8],
    pub key: [u8; 32],
}

impl PublicKey {
    /// Decodes a base64 public key token.
    ///
    /// Only the length is checked here; algorithm and key validity are left to
    /// the verifier.
    pub fn decode(base64_text: &str) -> Result<Self, FormatError> {
        let bin: [u8; PUBLIC_KEY_LEN] =
            codec::decode_exact::<PUBLIC_KEY_LEN>(base64_text).ok_or(FormatError::InvalidPublicKey)?;
        let key = PublicKey {
            signature_algorithm: codec::field(&bin, 0),
            key_id: codec::field(&bin, 2),
            key: codec::field(&bin, 10),
        };
        tracing::debug!(key_id = %key.key_id_hex(), "decoded public key");
        Ok(key)
    }

    /// Decodes the contents of a minisign `.pub` file, or a bare token.
    ///
    /// The key is the last non-empty line; a leading `untrusted comment:` line
    /// is skipped.
    pub fn from_minisign_text(text: &str) -> Result<Self, FormatError> {
        let token = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
            .ok_or(FormatError::InvalidPublicKey)?;
        Self::decode(token)
    }

    /// Reads and decodes a minisign `.pub` file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_minisign_text(&text)?)
    }

    /// Key id as minisign prints it: little-endian, 16 upper-case hex digits.
    pub fn key_id_hex(&self) -> String {
        codec::key_id_hex(&self.key_id)
    }
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose, Engine as _};

    use super::*;

    fn layout() -> Vec<u8> {
        let mut bin = b"Ed".to_vec();
        bin.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        bin.extend((0..32u8).map(|i| 0xA0 ^ i));
        bin
    }

    #[test]
    fn decodes_fields_by_offset() {
        let key = PublicKey::decode(&general_purpose::STANDARD.encode(layout())).unwrap();
        assert_eq!(&key.signature_algorithm, b"Ed");
        assert_eq!(key.key_id, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(key.key[0], 0xA0);
        assert_eq!(key.key[31], 0xA0 ^ 31);
    }

    #[test]
    fn rejects_short_and_long_keys() {
        let mut bin = layout();
        bin.pop();
        assert_eq!(
            PublicKey::decode(&general_purpose::STANDARD.encode(&bin)),
            Err(FormatError::InvalidPublicKey)
        );

        let mut bin = layout();
        bin.push(0);
        assert_eq!(
            PublicKey::decode(&general_purpose::STANDARD.encode(&bin)),
            Err(FormatError::InvalidPublicKey)
        );
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_eq!(PublicKey::decode("RWQ*not-a-key"), Err(FormatError::InvalidPublicKey));
        assert_eq!(PublicKey::decode(""), Err(FormatError::InvalidPublicKey));
    }

    #[test]
    fn algorithm_is_not_checked_at_decode_time() {
        let mut bin = layout();
        bin[0] = b'E';
        bin[1] = b'D';
        let key = PublicKey::decode(&general_purpose::STANDARD.encode(&bin)).unwrap();
        assert_eq!(&key.signature_algorithm, b"ED");
    }

    #[test]
    fn reads_minisign_pub_file_text() {
        let token = general_purpose::STANDARD.encode(layout());
        let text = format!("untrusted comment: minisign public key 0807060504030201\n{token}\n");
        let key = PublicKey::from_minisign_text(&text).unwrap();
        assert_eq!(key, PublicKey::decode(&token).unwrap());
        assert_eq!(PublicKey::from_minisign_text("\n\n"), Err(FormatError::InvalidPublicKey));
    }

    #[test]
    fn key_id_is_printed_little_endian() {
        let key = PublicKey::decode(&general_purpose::STANDARD.encode(layout())).unwrap();
        assert_eq!(key.key_id_hex(), "0807060504030201");
    }

    #[test]
    fn from_file_propagates_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = PublicKey::from_file(&dir.path().join("missing.pub")).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
