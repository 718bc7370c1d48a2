// src/trust.rs
// minisign verification: a per-message Ed25519 signature plus a global
// signature binding it to the trusted comment.

use std::path::Path;

use ed25519_dalek::VerifyingKey;

use crate::error::{Result, VerificationError};
use crate::key::PublicKey;
use crate::signature::Signature;
use crate::source::{SignatureSource, Transport};

/// Plain Ed25519 ("Ed"). The prehashed variant ("ED") is not supported.
pub const ED25519_ALGORITHM: [u8; 2] = *b"Ed";

/// Literal that starts the third line of a signature document.
pub const TRUSTED_COMMENT_PREFIX: &str = "trusted comment: ";

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Empty,
    Loaded { key: PublicKey, signature: Signature },
}

/// Holds one public key and one signature and checks messages against them.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    state: State,
}

impl Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `public_key` and the signature found at `source`.
    ///
    /// Nothing is stored unless both decode; on error the previous state is
    /// kept.
    pub fn load(&mut self, public_key: &str, source: &SignatureSource<'_>) -> Result<()> {
        let key = PublicKey::decode(public_key)?;
        let signature = source.load()?;
        self.load_decoded(key, signature);
        Ok(())
    }

    pub fn load_from_url(&mut self, url: &str, public_key: &str, transport: &dyn Transport) -> Result<()> {
        self.load(public_key, &SignatureSource::Url { url, transport })
    }

    pub fn load_from_file(&mut self, path: &Path, public_key: &str) -> Result<()> {
        self.load(public_key, &SignatureSource::File(path.to_path_buf()))
    }

    pub fn load_decoded(&mut self, key: PublicKey, signature: Signature) {
        self.state = State::Loaded { key, signature };
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded { .. })
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        match &self.state {
            State::Loaded { key, .. } => Some(key),
            State::Empty => None,
        }
    }

    pub fn signature(&self) -> Option<&Signature> {
        match &self.state {
            State::Loaded { signature, .. } => Some(signature),
            State::Empty => None,
        }
    }

    /// Checks `message` against the loaded key and signature.
    ///
    /// The checks run in a fixed order and the first failure is returned:
    /// algorithm agreement, algorithm support, key id, trusted comment framing,
    /// the message signature, then the global signature.
    pub fn verify(&self, message: &[u8]) -> std::result::Result<(), VerificationError> {
        let State::Loaded { key, signature } = &self.state else {
            return Err(VerificationError::NotLoaded);
        };
        let outcome = check(key, signature, message);
        if let Err(e) = outcome {
            tracing::warn!(key_id = %key.key_id_hex(), error = %e, "signature verification failed");
        }
        outcome
    }
}

fn check(key: &PublicKey, sig: &Signature, message: &[u8]) -> std::result::Result<(), VerificationError> {
    if key.signature_algorithm != sig.signature_algorithm {
        return Err(VerificationError::AlgorithmMismatch);
    }
    if sig.signature_algorithm != ED25519_ALGORITHM {
        return Err(VerificationError::UnsupportedAlgorithm);
    }
    if key.key_id != sig.key_id {
        return Err(VerificationError::KeyIdMismatch);
    }
    let payload = sig
        .trusted_comment
        .strip_prefix(TRUSTED_COMMENT_PREFIX)
        .ok_or(VerificationError::MalformedTrustedComment)?;

    // A key that is not a valid curve point cannot vouch for anything.
    let vk = VerifyingKey::from_bytes(&key.key).map_err(|_| VerificationError::InvalidSignature)?;

    let ed_sig = ed25519_dalek::Signature::from_bytes(&sig.signature);
    vk.verify_strict(message, &ed_sig).map_err(|_| VerificationError::InvalidSignature)?;

    let mut global_message = Vec::with_capacity(sig.signature.len() + payload.len());
    global_message.extend_from_slice(&sig.signature);
    global_message.extend_from_slice(payload.as_bytes());
    let global_sig = ed25519_dalek::Signature::from_bytes(&sig.global_signature);
    vk.verify_strict(&global_message, &global_sig)
        .map_err(|_| VerificationError::InvalidGlobalSignature)?;

    tracing::debug!(key_id = %key.key_id_hex(), trusted_comment = payload, "signature verified");
    Ok(())
}
