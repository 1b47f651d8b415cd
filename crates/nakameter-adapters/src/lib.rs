//! Nakameter Source Adapters
//!
//! One adapter per upstream API family, all built on the same pattern:
//!
//! 1. Issue the required remote calls through a [`ProviderClient`] -
//!    concurrently where they are independent, sequentially where one call
//!    needs another's result.
//! 2. Parse big integer source units (nano-denominated stakes) exactly into
//!    `u128` before any floating-point division.
//! 3. Hand weighted-entity distributions to the concentration analyzer.
//! 4. Resolve every metric field independently to a value or `None`.
//!
//! # Error Policy
//!
//! `get_all_metrics()` never fails and never panics. One call's failure
//! nulls only the fields derived from it - sibling fields survive. A
//! failure of the whole fetch path yields the all-null record, logged but
//! not propagated, so the caller's success/partial/failed classification
//! stays well-defined.
//!
//! [`ProviderClient`]: nakameter_client::ProviderClient

mod error;
mod extract;
mod record;

pub mod collector;
pub mod cosmos;
pub mod governance;
pub mod hosting;
pub mod mining;
pub mod tendermint;

pub use error::{AdapterError, Result};
pub use record::MetricsRecord;

pub use collector::ProjectSnapshot;
pub use cosmos::{CosmosStakingAdapter, StakingMetrics};
pub use governance::{GovernanceAdapter, GovernanceMetrics};
pub use hosting::{HostClass, HostingMetrics, NodeHostingAdapter};
pub use mining::{MiningMetrics, MiningPoolsAdapter};
pub use tendermint::TendermintRpcAdapter;
