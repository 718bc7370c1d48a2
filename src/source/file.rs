//! src/source/file.rs
//! Reads signature documents from local storage.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::signature::Signature;

/// Reads and decodes a signature file. I/O errors are returned unchanged.
pub fn read_signature(path: &Path) -> Result<Signature> {
    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read signature");
    Ok(Signature::from_bytes(&bytes)?)
}
