//! ETag middleware: fingerprint responses and answer conditional GETs.
//!
//! [`Etag`] wraps any [`Handler`]. For each request it:
//!
//! 1. substitutes a [`Capture`] for the real sink and runs the wrapped handler,
//! 2. derives a validator `"<length>-<sha1 hex>"` from the captured body,
//! 3. sets it as the `ETag` header unless the handler already set one or the
//!    status is outside `2xx` (or is `204 No Content`),
//! 4. answers `304 Not Modified` with an empty body when the request's
//!    conditional headers say the client's copy is fresh, and otherwise
//!    forwards the recorded status and body unchanged.
//!
//! The capture lives for exactly one request; the middleware itself holds only
//! its immutable configuration and is shared freely across connections.
//!
//! # Examples
//!
//! ```
//! use rttp_etag::etag::{Etag, Emission};
//! use rttp_etag::http::{Method, Request, Response, ResponseWriter, StatusCode};
//!
//! let etag = Etag::new(|_req: &Request, w: &mut dyn ResponseWriter| -> std::io::Result<()> {
//!     w.write(b"Hello World")?;
//!     Ok(())
//! });
//!
//! let mut first = Response::default();
//! etag.process(&Request::new(Method::Get, "/"), &mut first).unwrap();
//! let tag = first.headers().get("ETag").unwrap().to_owned();
//!
//! let revalidate = Request::new(Method::Get, "/").header("If-None-Match", tag);
//! let mut second = Response::default();
//! let emitted = etag.process(&revalidate, &mut second).unwrap();
//!
//! assert_eq!(emitted, Emission::NotModified);
//! assert_eq!(second.status(), StatusCode::NotModified);
//! assert!(second.body_ref().is_empty());
//! ```

use std::io;

use serde::{Deserialize, Serialize};

use crate::fresh;
use crate::handler::Handler;
use crate::http::{Headers, Request, ResponseWriter};

mod capture;
pub mod validator;

pub use capture::{Capture, Emission};

/// Decides whether a client's cached copy is still valid, given the request
/// headers and the finalized response headers. Must be free of side effects.
pub type FreshnessFn = fn(&Headers, &Headers) -> bool;

/// Validator generation settings.
///
/// Missing fields deserialize to their defaults, so an empty document selects
/// strong validators.
///
/// ```
/// use rttp_etag::etag::EtagConfig;
///
/// assert!(!EtagConfig::default().weak);
/// assert!(EtagConfig::weak().weak);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtagConfig {
    /// Prefix generated validators with `W/`.
    pub weak: bool,
}

impl EtagConfig {
    /// Plain quoted validators.
    pub fn strong() -> Self {
        Self { weak: false }
    }

    /// `W/`-prefixed validators.
    pub fn weak() -> Self {
        Self { weak: true }
    }
}

/// Handler middleware adding `ETag` validators and conditional `304` replies.
pub struct Etag<H> {
    inner: H,
    config: EtagConfig,
    is_fresh: FreshnessFn,
}

impl<H: Handler> Etag<H> {
    /// Wraps `inner`, generating strong validators.
    pub fn new(inner: H) -> Self {
        Self::with_config(inner, EtagConfig::strong())
    }

    /// Wraps `inner`, generating weak (`W/`-prefixed) validators.
    pub fn weak(inner: H) -> Self {
        Self::with_config(inner, EtagConfig::weak())
    }

    /// Wraps `inner` with explicit validator settings.
    pub fn with_config(inner: H, config: EtagConfig) -> Self {
        Self {
            inner,
            config,
            is_fresh: fresh::is_fresh,
        }
    }

    /// Replaces the freshness predicate (defaults to [`fresh::is_fresh`]).
    #[must_use]
    pub fn freshness(mut self, is_fresh: FreshnessFn) -> Self {
        self.is_fresh = is_fresh;
        self
    }

    /// Runs the wrapped handler against a fresh [`Capture`] of `w`, then emits
    /// the outcome into `w`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped handler's error, or the write error of `w` during
    /// emission.
    pub fn process(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<Emission> {
        let mut capture = Capture::new(w);
        self.inner.serve(req, &mut capture)?;
        capture.finish(req, &self.config, self.is_fresh)
    }
}

impl<H: Handler> Handler for Etag<H> {
    fn serve(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()> {
        self.process(req, w).map(drop)
    }
}
