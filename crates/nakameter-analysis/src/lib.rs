//! Nakameter Analysis
//!
//! The two measurement algorithms shared by every source adapter:
//!
//! - [`concentration`]: Nakamoto coefficient and top-N concentration over an
//!   arbitrary weighted-entity list (validators, mining pools, voters).
//! - [`Sampler`]: a bounded random-sampling estimator for populations far too
//!   large to enumerate one remote call at a time.
//!
//! # Exact Arithmetic
//!
//! Concentration thresholds are compared entirely in `u128` integer space
//! (`cum * den >= total * num`). No float participates until the final
//! percentage output, so nano-unit stakes above 2^53 lose nothing.
//!
//! # Sampled Results Are Marked
//!
//! A sampling estimate carries a confidence strictly below 1.0 even at 100%
//! probe success. Exhaustive and sampled measurements must never be
//! confusable downstream.

mod concentration;
mod sampling;

pub use concentration::{concentration, AttackFraction};
pub use sampling::{SampleOutcome, Sampler, DEFAULT_CONFIDENCE_CAP};
