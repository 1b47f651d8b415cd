//! Internal error plumbing for adapters.
//!
//! These errors never cross an adapter's public boundary: they exist so the
//! fetch-and-parse helpers compose with `?`, and are converted to nulled
//! metric fields (with a `warn!`) at the record-assembly layer.

use thiserror::Error;

use nakameter_client::FetchError;

/// Result type for adapter-internal operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Anything that can go wrong between "issue the call" and "typed metrics".
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The remote call itself failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A well-formed response is missing an expected field.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but not parseable as the expected type.
    #[error("malformed {field}: {value:?}")]
    Malformed {
        /// Which field.
        field: &'static str,
        /// What it contained.
        value: String,
    },
}
