//! Minisign signature documents.
//!
//! ```text
//! untrusted comment: <free text>
//! base64(algorithm[2] ‖ key_id[8] ‖ signature[64])
//! trusted comment: <payload>
//! base64(global_signature[64])
//! ```

use crate::codec;
use crate::error::FormatError;

/// Decoded length of the second line.
pub const SIGNATURE_BLOB_LEN: usize = 2 + 8 + 64;
pub const GLOBAL_SIGNATURE_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Never authenticated.
    pub untrusted_comment: String,
    pub signature_algorithm: [u8; 2],
    pub key_id: [u8; 8],
    /// Ed25519 signature over the artifact bytes.
    pub signature: [u8; 64],
    /// Whole third line, prefix included. Checked by the verifier.
    pub trusted_comment: String,
    /// Ed25519 signature over `signature ‖ trusted comment payload`.
    pub global_signature: [u8; 64],
}

impl Signature {
    /// Decodes a signature document.
    ///
    /// The text is split on the first three newlines, so the fourth field keeps
    /// whatever follows; a trailing newline there is tolerated.
    pub fn decode(text: &str) -> Result<Self, FormatError> {
        let fields: Vec<&str> = text.splitn(4, '\n').collect();
        let [untrusted, blob, trusted, global] = fields[..] else {
            return Err(FormatError::IncompleteSignature);
        };

        let bin: [u8; SIGNATURE_BLOB_LEN] =
            codec::decode_exact::<SIGNATURE_BLOB_LEN>(blob).ok_or(FormatError::InvalidSignature)?;
        let global_signature: [u8; GLOBAL_SIGNATURE_LEN] =
            codec::decode_exact::<GLOBAL_SIGNATURE_LEN>(global).ok_or(FormatError::InvalidSignature)?;

        let sig = Signature {
            untrusted_comment: untrusted.to_string(),
            signature_algorithm: codec::field(&bin, 0),
            key_id: codec::field(&bin, 2),
            signature: codec::field(&bin, 10),
            trusted_comment: trusted.to_string(),
            global_signature,
        };
        tracing::debug!(untrusted_comment = %sig.untrusted_comment, "decoded signature");
        Ok(sig)
    }

    /// Decodes a signature document from raw bytes, whatever their source.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let text = std::str::from_utf8(bytes).map_err(|_| FormatError::NotUtf8)?;
        Self::decode(text)
    }

    /// Id of the key that produced this signature, formatted like
    /// [`PublicKey::key_id_hex`](crate::key::PublicKey::key_id_hex).
    pub fn key_id_hex(&self) -> String {
        codec::key_id_hex(&self.key_id)
    }
}
