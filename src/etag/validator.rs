//! Validator token formatting.
//!
//! A token is the quoted pair `"<length>-<sha1 hex>"`, with a `W/` prefix when
//! the middleware runs in weak mode.

use sha1::{Digest, Sha1};

/// Formats a validator from a body length and its finalized digest.
///
/// ```
/// use rttp_etag::etag::validator;
///
/// assert_eq!(validator::token(3, &[0xab, 0x01], false), "\"3-ab01\"");
/// assert_eq!(validator::token(3, &[0xab, 0x01], true), "W/\"3-ab01\"");
/// ```
pub fn token(len: usize, digest: &[u8], weak: bool) -> String {
    let tag = format!("\"{len}-{}\"", hex::encode(digest));
    if weak { format!("W/{tag}") } else { tag }
}

/// Computes the validator of a complete body in one step.
pub fn of(body: &[u8], weak: bool) -> String {
    token(body.len(), &Sha1::digest(body), weak)
}
