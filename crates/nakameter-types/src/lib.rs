//! Nakameter Data Model
//!
//! Shared types for decentralization measurement: measured values flowing out
//! of source adapters, weighted-entity lists feeding concentration analysis,
//! and the scored output records.
//!
//! # Null Is Not Zero
//!
//! An unavailable measurement is [`MetricValue::Null`], never `0`. The
//! distinction is load-bearing: a validator set we failed to fetch must not
//! score like a validator set with zero stake. `Null` propagates through every
//! downstream computation and is excluded (not zeroed) when category averages
//! are taken.
//!
//! # Weights Are Exact
//!
//! [`WeightedEntity::weight`] is a `u128`. Stake is commonly reported in
//! nano-units of a token, which overflows both `u64` and the 2^53 mantissa of
//! an `f64` for large networks. Weight sums and threshold comparisons stay in
//! integer arithmetic; floats appear only in final percentage output.

mod ids;
mod measure;
mod entity;
mod score;

pub use ids::{CriterionId, ProjectId, ProviderId};
pub use measure::{FetchStatus, MeasuredValue, MetricValue};
pub use entity::{ConcentrationResult, SampleEstimate, WeightedEntity};
pub use score::{Category, Direction, ProjectScore};
