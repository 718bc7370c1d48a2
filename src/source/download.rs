//! src/source/download.rs
//! Fetches signature documents over HTTP through a pluggable transport.

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::{Error, Result, TransportError};
use crate::signature::Signature;

/// Status and body of a completed GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Blocking GET capability supplied by the caller.
///
/// Timeouts, proxies and retries belong to the implementation; the fetch
/// logic only looks at the status and the body bytes.
pub trait Transport {
    fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

/// [`Transport`] backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> std::result::Result<Self, TransportError> {
        Self::build(None)
    }

    pub fn with_timeout(timeout: Duration) -> std::result::Result<Self, TransportError> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> std::result::Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("nxsig/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(ReqwestTransport { client: builder.build()? })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// Fetches the raw signature document at `url`.
///
/// Non-success statuses are returned as [`Error::Status`].
pub fn fetch_bytes<T: Transport + ?Sized>(transport: &T, url: &str) -> Result<Vec<u8>> {
    let response = transport.get(url).map_err(Error::Transport)?;
    tracing::debug!(url, status = %response.status, bytes = response.body.len(), "fetched signature");
    if !response.status.is_success() {
        return Err(Error::Status(response.status));
    }
    Ok(response.body)
}

/// Fetches and decodes a signature document.
pub fn fetch_signature<T: Transport + ?Sized>(transport: &T, url: &str) -> Result<Signature> {
    let bytes = fetch_bytes(transport, url)?;
    Ok(Signature::from_bytes(&bytes)?)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::FormatError;

    struct Canned {
        status: StatusCode,
        body: &'static [u8],
        requested: RefCell<Vec<String>>,
    }

    impl Canned {
        fn new(status: StatusCode, body: &'static [u8]) -> Self {
            Canned { status, body, requested: RefCell::new(Vec::new()) }
        }
    }

    impl Transport for Canned {
        fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError> {
            self.requested.borrow_mut().push(url.to_string());
            Ok(HttpResponse { status: self.status, body: self.body.to_vec() })
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn get(&self, _url: &str) -> std::result::Result<HttpResponse, TransportError> {
            Err("connection refused".into())
        }
    }

    #[test]
    fn returns_body_on_success() {
        let t = Canned::new(StatusCode::OK, b"body");
        assert_eq!(fetch_bytes(&t, "https://example.org/a.minisig").unwrap(), b"body");
        assert_eq!(t.requested.borrow().as_slice(), ["https://example.org/a.minisig"]);
    }

    #[test]
    fn non_success_status_is_forwarded() {
        let t = Canned::new(StatusCode::NOT_FOUND, b"missing");
        let err = fetch_bytes(&t, "https://example.org/a.minisig").unwrap_err();
        assert!(matches!(err, Error::Status(s) if s == StatusCode::NOT_FOUND));
    }

    #[test]
    fn transport_failure_is_forwarded() {
        let err = fetch_bytes(&Unreachable, "https://example.org/a.minisig").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn malformed_body_is_a_format_error() {
        let t = Canned::new(StatusCode::OK, b"only one line");
        let err = fetch_signature(&t, "https://example.org/a.minisig").unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::IncompleteSignature)));
    }
}
