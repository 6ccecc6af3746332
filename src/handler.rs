//! Request handlers.
//!
//! A [`Handler`] receives a [`Request`] and writes its answer into whatever
//! [`ResponseWriter`] it is given. Handlers never see the socket, which is what
//! lets middleware such as [`Etag`](crate::etag::Etag) substitute a buffering
//! writer for the real one.

use std::io;

use crate::http::{Request, ResponseWriter};

/// Serves one request by writing into a response sink.
///
/// Any `Fn(&Request, &mut dyn ResponseWriter) -> io::Result<()>` that is
/// `Send + Sync` implements this trait through the blanket impl below.
///
/// # Contract
///
/// - `serve` is invoked exactly once per request.
/// - Implementations must be `Send + Sync`; the transport shares one handler
///   across all connection tasks.
///
/// # Examples
///
/// ```
/// use rttp_etag::handler::Handler;
/// use rttp_etag::http::{Method, Request, Response, ResponseWriter};
///
/// let hello = |_req: &Request, w: &mut dyn ResponseWriter| -> std::io::Result<()> {
///     w.write(b"Hello World")?;
///     Ok(())
/// };
///
/// let mut response = Response::default();
/// hello.serve(&Request::new(Method::Get, "/"), &mut response).unwrap();
/// assert_eq!(response.body_ref(), b"Hello World");
/// ```
pub trait Handler: Send + Sync {
    /// Writes the response for `req` into `w`.
    ///
    /// # Errors
    ///
    /// Returns the first write error reported by `w`.
    fn serve(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut dyn ResponseWriter) -> io::Result<()> + Send + Sync,
{
    fn serve(&self, req: &Request, w: &mut dyn ResponseWriter) -> io::Result<()> {
        self(req, w)
    }
}
