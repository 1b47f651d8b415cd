//! Error types for the fetch layer.

use thiserror::Error;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Uniform failure shape for every remote call.
///
/// Every way a call can go wrong maps into exactly one of these variants.
/// No transport-level error escapes the fetch layer in any other form.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The per-call timeout elapsed before a response arrived.
    #[error("request timed out after {elapsed_ms}ms")]
    Timeout {
        /// The configured timeout that elapsed.
        elapsed_ms: u64,
    },

    /// The upstream answered with a non-2xx status.
    #[error("HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body (or status text when the body is unreadable).
        body: String,
    },

    /// Network-level failure: DNS, connect, TLS, mid-stream reset.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A well-formed JSON-RPC response carrying an error object.
    #[error("rpc error: {0}")]
    Rpc(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest surfaces its own (connect-level) timeouts as errors too;
        // fold them into the same variant the outer deadline uses.
        if e.is_timeout() {
            FetchError::Timeout { elapsed_ms: 0 }
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let e = FetchError::Timeout { elapsed_ms: 5000 };
        assert_eq!(e.to_string(), "request timed out after 5000ms");

        let e = FetchError::Status {
            code: 429,
            body: "Too Many Requests".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP 429: Too Many Requests");
    }
}
