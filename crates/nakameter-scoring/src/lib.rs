//! Nakameter Scoring Engine
//!
//! Folds a map of criterion -> value-or-null into one weighted
//! [`ProjectScore`]. Purely in-memory: values in, score record out, no I/O.
//!
//! # Null Exclusion
//!
//! A null criterion value is *excluded* from its category's average, never
//! treated as 0. A two-criterion category scoring `{8, null}` averages 8.
//! Anything else would punish projects for our fetch failures.
//!
//! # Kill Switch
//!
//! A confirmed unilateral freeze/pause/halt power caps the total score at
//! [`KILL_SWITCH_CEILING`] no matter how decentralized everything else
//! looks. The uncapped value is preserved alongside so capped projects
//! still rank against each other.

mod criteria;
mod engine;

pub use criteria::{catalog, Criterion, Normalization};
pub use engine::{
    ScoringEngine, CHAIN_WEIGHT, CONTROL_WEIGHT, FAIRNESS_WEIGHT, KILL_SWITCH_CEILING,
    KILL_SWITCH_CRITERION, KILL_SWITCH_CUTOFF,
};
