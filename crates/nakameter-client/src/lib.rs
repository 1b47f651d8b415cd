//! Nakameter Fetch Layer
//!
//! Every remote call in the system goes through a [`ProviderClient`]: a
//! rate-limited, timeout-bounded wrapper around one upstream provider's API.
//!
//! # Failure Shaping
//!
//! All failure modes - network errors, timeouts, non-2xx responses, decode
//! failures, JSON-RPC error envelopes - are converted into [`FetchError`]
//! at this boundary. Nothing past this crate sees a panic or a raw
//! transport error; callers decide what a failed call means for their run.
//!
//! # Rate Limiting Scope
//!
//! A [`RateLimiter`] paces calls on one client instance only. There is no
//! global coordination: a throttled or degraded provider never blocks
//! unrelated providers. Failed calls still count against the rate budget -
//! the last-request marker advances when the call is issued, not when it
//! succeeds.

mod client;
mod error;
mod limiter;

pub use client::{ClientConfig, ProviderClient};
pub use error::{FetchError, Result};
pub use limiter::RateLimiter;
