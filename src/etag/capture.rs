//! Capture phase: the buffering, hashing stand-in for the real sink.

use std::io;

use bytes::BytesMut;
use sha1::{Digest, Sha1};
use tracing::debug;

use super::{EtagConfig, FreshnessFn, validator};
use crate::http::headers::ETAG;
use crate::http::{Headers, Request, ResponseWriter, StatusCode};

/// What [`Capture::finish`] sent to the real sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// The handler never set a status nor wrote a byte; nothing was forwarded.
    Skipped,
    /// The client's copy is fresh: `304` with an empty body.
    NotModified,
    /// The recorded status followed by the whole buffered body.
    FullBody,
}

impl Emission {
    /// Short snake_case label used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::NotModified => "not_modified",
            Self::FullBody => "full_body",
        }
    }
}

/// A [`ResponseWriter`] that holds back status and body from the sink it wraps.
///
/// Every body write lands in an in-memory buffer and in a SHA-1 accumulator,
/// in the same order, so the digest always describes exactly the buffered
/// bytes. Headers are not intercepted: reads and writes go straight to the
/// wrapped sink.
///
/// Nothing reaches the wrapped sink's status or body until
/// [`finish`](Self::finish) consumes the capture.
///
/// # Examples
///
/// ```
/// use rttp_etag::etag::{Capture, EtagConfig, Emission};
/// use rttp_etag::fresh::is_fresh;
/// use rttp_etag::http::{Method, Request, Response, ResponseWriter};
///
/// let mut response = Response::default();
/// let mut capture = Capture::new(&mut response);
/// capture.write(b"Hello ").unwrap();
/// capture.write(b"World").unwrap();
///
/// let request = Request::new(Method::Get, "/");
/// let emitted = capture.finish(&request, &EtagConfig::default(), is_fresh).unwrap();
///
/// assert_eq!(emitted, Emission::FullBody);
/// assert_eq!(
///     response.headers().get("etag"),
///     Some("\"11-0a4d55a8d778e5022fab701977c5d840bbc486d0\"")
/// );
/// ```
pub struct Capture<'w> {
    inner: &'w mut dyn ResponseWriter,
    status: Option<StatusCode>,
    body: BytesMut,
    hasher: Sha1,
    len: usize,
}

impl<'w> Capture<'w> {
    /// Starts capturing on behalf of the real sink `inner`.
    pub fn new(inner: &'w mut dyn ResponseWriter) -> Self {
        Self {
            inner,
            status: None,
            body: BytesMut::new(),
            hasher: Sha1::new(),
            len: 0,
        }
    }

    /// The status recorded so far, `None` until the handler sets one or writes.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Number of body bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no body bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffered body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Lowercase hex SHA-1 of everything written so far.
    pub fn digest(&self) -> String {
        hex::encode(self.hasher.clone().finalize())
    }

    /// Ends the capture phase and emits exactly one outcome into the wrapped sink.
    ///
    /// A `2xx` response other than `204 No Content` gets an `ETag` unless the
    /// handler already set one, and is then checked against the request with
    /// `is_fresh`. Every other recorded response is forwarded unchanged.
    ///
    /// # Errors
    ///
    /// Returns the wrapped sink's write error. Nothing is retried.
    pub fn finish(
        self,
        request: &Request,
        config: &EtagConfig,
        is_fresh: FreshnessFn,
    ) -> io::Result<Emission> {
        let Capture {
            inner,
            status,
            body,
            hasher,
            len,
        } = self;

        let Some(status) = status else {
            debug!(outcome = Emission::Skipped.as_str(), "handler wrote nothing");
            return Ok(Emission::Skipped);
        };

        if !status.is_success() || status == StatusCode::NoContent {
            debug!(status = status.as_u16(), bytes = len, "not validatable, forwarding");
            return forward(inner, status, &body);
        }

        if !inner.headers().contains(ETAG) {
            let tag = validator::token(len, &hasher.finalize(), config.weak);
            inner.headers_mut().set(ETAG, tag);
        }

        let emission = if is_fresh(request.headers(), inner.headers()) {
            inner.write_status(StatusCode::NotModified);
            Emission::NotModified
        } else {
            forward(&mut *inner, status, &body)?
        };

        debug!(
            status = status.as_u16(),
            bytes = len,
            etag = inner.headers().get(ETAG).unwrap_or_default(),
            outcome = emission.as_str(),
            "response fingerprinted"
        );
        Ok(emission)
    }
}

fn forward(inner: &mut dyn ResponseWriter, status: StatusCode, body: &[u8]) -> io::Result<Emission> {
    inner.write_status(status);
    inner.write_all(body)?;
    Ok(Emission::FullBody)
}

impl ResponseWriter for Capture<'_> {
    fn headers(&self) -> &Headers {
        self.inner.headers()
    }

    fn headers_mut(&mut self) -> &mut Headers {
        self.inner.headers_mut()
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.status.get_or_insert(StatusCode::Ok);
        self.body.extend_from_slice(buf);
        self.hasher.update(buf);
        self.len += buf.len();
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fresh::is_fresh;
    use crate::http::{Method, Response};
    use crate::http::headers::IF_NONE_MATCH;

    const HELLO_ETAG: &str = "\"11-0a4d55a8d778e5022fab701977c5d840bbc486d0\"";

    fn get() -> Request {
        Request::new(Method::Get, "/")
    }

    #[test]
    fn write_implies_ok_status() {
        let mut sink = Response::default();
        let mut capture = Capture::new(&mut sink);
        assert_eq!(capture.status(), None);
        capture.write(b"").unwrap();
        assert_eq!(capture.status(), Some(StatusCode::Ok));
    }

    #[test]
    fn explicit_status_survives_later_writes() {
        let mut sink = Response::default();
        let mut capture = Capture::new(&mut sink);
        capture.write_status(StatusCode::Created);
        capture.write(b"x").unwrap();
        assert_eq!(capture.status(), Some(StatusCode::Created));
    }

    #[test]
    fn buffer_and_digest_track_the_same_bytes() {
        let chunks: [&[u8]; 4] = [b"He", b"", b"llo Wor", b"ld"];
        let mut sink = Response::default();
        let mut capture = Capture::new(&mut sink);
        for chunk in chunks {
            capture.write(chunk).unwrap();
        }
        assert_eq!(capture.body(), b"Hello World");
        assert_eq!(capture.len(), 11);
        assert_eq!(capture.digest(), hex::encode(Sha1::digest(b"Hello World")));
    }

    #[test]
    fn nothing_reaches_the_sink_before_finish() {
        let mut sink = Response::new(StatusCode::Ok);
        {
            let mut capture = Capture::new(&mut sink);
            capture.write_status(StatusCode::NotFound);
            capture.write(b"missing").unwrap();
            capture.headers_mut().set("Content-Type", "text/plain");
        }
        assert_eq!(sink.status(), StatusCode::Ok);
        assert!(sink.body_ref().is_empty());
        assert_eq!(sink.headers().get("content-type"), Some("text/plain"));
    }

    #[test]
    fn skipped_when_handler_wrote_nothing() {
        let mut sink = Response::new(StatusCode::Accepted);
        let capture = Capture::new(&mut sink);
        let emitted = capture.finish(&get(), &EtagConfig::default(), is_fresh).unwrap();
        assert_eq!(emitted, Emission::Skipped);
        assert_eq!(sink.status(), StatusCode::Accepted);
        assert!(!sink.headers().contains(ETAG));
    }

    #[test]
    fn full_body_carries_strong_etag() {
        let mut sink = Response::default();
        let mut capture = Capture::new(&mut sink);
        capture.write(b"Hello World").unwrap();
        let emitted = capture.finish(&get(), &EtagConfig::default(), is_fresh).unwrap();
        assert_eq!(emitted, Emission::FullBody);
        assert_eq!(sink.headers().get(ETAG), Some(HELLO_ETAG));
        assert_eq!(sink.body_ref(), b"Hello World");
    }

    #[test]
    fn matching_request_gets_not_modified() {
        let mut sink = Response::default();
        let mut capture = Capture::new(&mut sink);
        capture.write(&vec![b'a'; 64 * 1024]).unwrap();
        let tag = validator::of(&vec![b'a'; 64 * 1024], false);
        let request = get().header(IF_NONE_MATCH, tag.clone());
        let emitted = capture.finish(&request, &EtagConfig::default(), is_fresh).unwrap();
        assert_eq!(emitted, Emission::NotModified);
        assert_eq!(sink.status(), StatusCode::NotModified);
        assert!(sink.body_ref().is_empty());
        assert_eq!(sink.headers().get(ETAG), Some(tag.as_str()));
    }

    #[test]
    fn freshness_predicate_is_injected() {
        let mut sink = Response::default();
        let mut capture = Capture::new(&mut sink);
        capture.write(b"body").unwrap();
        let emitted = capture
            .finish(&get(), &EtagConfig::default(), |_, _| true)
            .unwrap();
        assert_eq!(emitted, Emission::NotModified);
    }

    #[test]
    fn non_success_is_forwarded_untagged_even_if_fresh() {
        let mut sink = Response::default();
        let mut capture = Capture::new(&mut sink);
        capture.write_status(StatusCode::NotFound);
        capture.write(b"no such page").unwrap();
        let emitted = capture
            .finish(&get(), &EtagConfig::default(), |_, _| true)
            .unwrap();
        assert_eq!(emitted, Emission::FullBody);
        assert_eq!(sink.status(), StatusCode::NotFound);
        assert_eq!(sink.body_ref(), b"no such page");
        assert!(!sink.headers().contains(ETAG));
    }

    struct BrokenPipe(Headers);

    impl ResponseWriter for BrokenPipe {
        fn headers(&self) -> &Headers {
            &self.0
        }

        fn headers_mut(&mut self) -> &mut Headers {
            &mut self.0
        }

        fn write_status(&mut self, _status: StatusCode) {}

        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn sink_write_failure_propagates() {
        let mut sink = BrokenPipe(Headers::new());
        let mut capture = Capture::new(&mut sink);
        capture.write(b"Hello World").unwrap();
        let err = capture
            .finish(&get(), &EtagConfig::default(), is_fresh)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(sink.0.get(ETAG), Some(HELLO_ETAG));
    }
}
