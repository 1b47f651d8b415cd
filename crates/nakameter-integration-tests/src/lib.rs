//! Test support for end-to-end pipeline tests.
//!
//! A fixture HTTP server serving canned JSON responses by path, so whole
//! adapter -> analysis -> scoring -> snapshot runs execute against
//! localhost with zero live network.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A localhost HTTP server answering registered paths with fixed JSON.
///
/// Unregistered paths get a 404, which exercises the adapters'
/// failure-isolation paths the same way a dead upstream endpoint would.
pub struct FixtureServer {
    addr: SocketAddr,
}

impl FixtureServer {
    /// Start a server answering `routes` (path -> JSON body). Query strings
    /// are ignored when matching.
    pub async fn start<S: Into<String>>(
        routes: impl IntoIterator<Item = (S, serde_json::Value)>,
    ) -> Self {
        let routes: Arc<HashMap<String, String>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, body)| (path.into(), body.to_string()))
                .collect(),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fixture server");
        let addr = listener.local_addr().expect("fixture server address");

        tokio::spawn(async move {
            loop {
                let Ok((sock, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(handle_connection(sock, routes.clone()));
            }
        });

        Self { addr }
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:49152`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn handle_connection(mut sock: tokio::net::TcpStream, routes: Arc<HashMap<String, String>>) {
    // Read until the end of the request headers; bodies (JSON-RPC posts)
    // are irrelevant to path-based routing.
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match sock.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    let request = String::from_utf8_lossy(&buf);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = path.split('?').next().unwrap_or("/");

    let response = match routes.get(path) {
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
        None => {
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n".to_string()
        }
    };
    let _ = sock.write_all(response.as_bytes()).await;
    let _ = sock.shutdown().await;
}

/// Install the test tracing subscriber (idempotent).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
