//! Where signature documents come from.
//!
//! Both adapters only obtain bytes; decoding is always
//! [`Signature::from_bytes`](crate::signature::Signature::from_bytes).

pub mod download;
pub mod file;

use std::path::PathBuf;

pub use download::{fetch_signature, HttpResponse, ReqwestTransport, Transport};
pub use file::read_signature;

use crate::error::Result;
use crate::signature::Signature;

/// Location of a signature document.
pub enum SignatureSource<'a> {
    Url { url: &'a str, transport: &'a dyn Transport },
    File(PathBuf),
}

impl SignatureSource<'_> {
    pub fn load(&self) -> Result<Signature> {
        match self {
            SignatureSource::Url { url, transport } => fetch_signature(*transport, url),
            SignatureSource::File(path) => read_signature(path),
        }
    }
}

impl std::fmt::Debug for SignatureSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureSource::Url { url, .. } => f.debug_struct("Url").field("url", url).finish_non_exhaustive(),
            SignatureSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}
