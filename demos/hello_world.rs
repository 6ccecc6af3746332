//! Serves "Hello World" with ETag support on http://127.0.0.1:8080.
//!
//! ```text
//! curl -i http://127.0.0.1:8080/
//! curl -i -H 'If-None-Match: "11-0a4d55a8d778e5022fab701977c5d840bbc486d0"' http://127.0.0.1:8080/
//! ```

use rttp_etag::{Etag, EtagConfig, Request, ResponseWriter, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = EtagConfig {
        weak: std::env::args().any(|arg| arg == "--weak"),
    };

    let handler = Etag::with_config(
        |_req: &Request, w: &mut dyn ResponseWriter| -> std::io::Result<()> {
            w.headers_mut().set("Content-Type", "text/plain; charset=utf-8");
            w.write(b"Hello World")?;
            Ok(())
        },
        config,
    );

    let server = Server::bind("127.0.0.1:8080").await?;
    server.run(handler).await?;
    Ok(())
}
