//! Error types for key/signature decoding, retrieval and verification.

use reqwest::StatusCode;

/// Boxed error returned by a [`Transport`](crate::source::Transport) implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Malformed public key or signature document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Base64 decoding failed or the key is not 42 bytes.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Fewer than four newline-delimited fields.
    #[error("incomplete signature")]
    IncompleteSignature,

    /// A signature field failed base64 decoding or has the wrong length.
    #[error("invalid signature")]
    InvalidSignature,

    /// The signature document is not UTF-8 text.
    #[error("signature is not valid UTF-8")]
    NotUtf8,
}

/// Reasons a loaded key/signature pair does not vouch for a message.
///
/// Checks run in a fixed order and the first failing one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// `verify` was called before a successful `load`.
    #[error("no public key and signature loaded")]
    NotLoaded,

    #[error("incompatible signature algorithm")]
    AlgorithmMismatch,

    #[error("unsupported signature algorithm")]
    UnsupportedAlgorithm,

    #[error("incompatible key identifiers")]
    KeyIdMismatch,

    #[error("unexpected format for the trusted comment")]
    MalformedTrustedComment,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid global signature")]
    InvalidGlobalSignature,
}

impl VerificationError {
    /// True when the failure proves the artifact or its trusted comment is not
    /// what the key holder signed, as opposed to a key/signature mismatch.
    pub fn is_tampering(&self) -> bool {
        matches!(self, Self::InvalidSignature | Self::InvalidGlobalSignature)
    }
}

/// Crate-level error returned by loading and retrieval.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Local read failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The signature server answered with a non-success status.
    #[error("unexpected HTTP status: {0}")]
    Status(StatusCode),

    /// The transport could not complete the request.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),
}

pub type Result<T> = std::result::Result<T, Error>;
