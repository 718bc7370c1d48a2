//! minisign signature verification for NeoniX self-updates.
//!
//! Before an update is applied, the downloaded artifact is checked against a
//! detached minisign signature and a single trusted Ed25519 public key:
//!
//! ```no_run
//! use std::path::Path;
//! use nxsig::Verifier;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut verifier = Verifier::new();
//! verifier.load_from_file(
//!     Path::new("nxpkg.minisig"),
//!     "RWTDofBrLZ5EWHm1Vi6P5lT5QHixEuipi6eQH4U65pW+1+DjkQutBJZk",
//! )?;
//! verifier.verify(&std::fs::read("nxpkg")?)?;
//! # Ok(())
//! # }
//! ```
//!
//! Any error from `load` or `verify` means the artifact must not be trusted.

mod codec;
pub mod error;
pub mod key;
pub mod signature;
pub mod source;
pub mod trust;

pub use error::{Error, FormatError, Result, VerificationError};
pub use key::PublicKey;
pub use signature::Signature;
pub use source::{HttpResponse, ReqwestTransport, SignatureSource, Transport};
pub use trust::{Verifier, ED25519_ALGORITHM, TRUSTED_COMMENT_PREFIX};
