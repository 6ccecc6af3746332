//! The response sink handlers write into.
//!
//! A [`ResponseWriter`] is the minimal capability a handler needs: record a
//! status, append body bytes, and read or mutate headers. The transport hands
//! each request a [`Response`](super::Response); middleware can substitute its
//! own implementation (for example [`Capture`](crate::etag::Capture)) without
//! the handler noticing.

use std::io;

use super::{Headers, StatusCode};

/// A sink for one HTTP response.
///
/// Implementations must treat headers as pass-through state: whatever a
/// handler inserts through [`headers_mut`](Self::headers_mut) is what the
/// client sees, unless a middleware deliberately changes it afterwards.
///
/// # Examples
///
/// ```
/// use rttp_etag::http::{Response, ResponseWriter, StatusCode};
///
/// fn render(w: &mut dyn ResponseWriter) -> std::io::Result<()> {
///     w.headers_mut().set("Content-Type", "text/plain");
///     w.write_status(StatusCode::Created);
///     w.write(b"made it")?;
///     Ok(())
/// }
///
/// let mut response = Response::default();
/// render(&mut response).unwrap();
/// assert_eq!(response.status(), StatusCode::Created);
/// assert_eq!(response.body_ref(), b"made it");
/// ```
pub trait ResponseWriter {
    /// Returns the outgoing header set.
    fn headers(&self) -> &Headers;

    /// Returns the outgoing header set for modification.
    fn headers_mut(&mut self) -> &mut Headers;

    /// Records the response status.
    fn write_status(&mut self, status: StatusCode);

    /// Appends `buf` to the response body, returning the number of bytes taken.
    ///
    /// # Errors
    ///
    /// Propagates whatever the underlying transport reports; implementations
    /// that only buffer in memory never fail.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Writes all of `buf`, failing on the first error or zero-length write.
    fn write_all(&mut self, mut buf: &[u8]) -> io::Result<()> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole response body",
                    ));
                }
                n => buf = &buf[n..],
            }
        }
        Ok(())
    }
}
