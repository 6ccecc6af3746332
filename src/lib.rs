//! # rttp-etag
//!
//! `ETag` response fingerprinting and conditional GET handling for the rttp
//! HTTP/1.1 stack.
//!
//! [`Etag`] wraps a [`Handler`], buffers and SHA-1 hashes whatever the handler
//! writes, tags successful responses with a `"<length>-<sha1>"` validator, and
//! answers `304 Not Modified` when the client already holds that version.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rttp_etag::{Etag, Request, ResponseWriter, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::bind("127.0.0.1:8080").await?;
//!     println!("Listening on http://127.0.0.1:8080");
//!     server
//!         .run(Etag::new(|_req: &Request, w: &mut dyn ResponseWriter| -> std::io::Result<()> {
//!             w.write(b"Hello World")?;
//!             Ok(())
//!         }))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod etag;
pub mod fresh;
pub mod handler;
pub mod http;
pub mod server;

pub use etag::{Emission, Etag, EtagConfig};
pub use handler::Handler;
pub use http::{Headers, Method, Request, Response, ResponseWriter, StatusCode};
pub use server::{Server, ServerError};
