//! Tendermint RPC validator adapter.
//!
//! JSON-RPC fallback for the staking criterion family: chains whose LCD is
//! down or never deployed still expose `validators` over Tendermint RPC.
//! Voting power is already denominated in whole "power" units (stake /
//! 10^6), so the record's `bonded_tokens` is the summed voting power.

use serde_json::json;
use tracing::{debug, warn};

use nakameter_analysis::{concentration, AttackFraction};
use nakameter_client::ProviderClient;
use nakameter_types::WeightedEntity;

use crate::cosmos::StakingMetrics;
use crate::error::Result;
use crate::extract::{array_field, str_field, u128_field, u64_field};
use crate::record::MetricsRecord;

/// Upper bound on pagination walks.
const MAX_PAGES: usize = 20;

/// Validators requested per page (Tendermint caps at 100).
const PER_PAGE: &str = "100";

/// Adapter for Tendermint JSON-RPC `validators`.
pub struct TendermintRpcAdapter {
    client: ProviderClient,
    rpc_url: String,
}

impl TendermintRpcAdapter {
    /// Adapter against a Tendermint RPC endpoint.
    pub fn new(client: ProviderClient, rpc_url: impl Into<String>) -> Self {
        Self {
            client,
            rpc_url: rpc_url.into(),
        }
    }

    /// Fetch and reduce the validator-set metrics.
    ///
    /// Never fails; a fetch failure yields the all-null record.
    pub async fn get_all_metrics(&self) -> StakingMetrics {
        let validators = match self.fetch_validator_set().await {
            Ok(v) => v,
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "rpc validator set unavailable");
                return StakingMetrics::null();
            }
        };

        let conc = concentration(&validators, AttackFraction::ONE_THIRD);
        let total_power: u128 = validators.iter().map(|v| v.weight).sum();

        StakingMetrics {
            validator_count: Some(validators.len() as u64),
            nakamoto_coefficient: conc.map(|c| c.nakamoto_coefficient as u64),
            top5_concentration: conc.map(|c| c.top5_pct),
            top10_concentration: conc.map(|c| c.top10_pct),
            // Empty set: no power sum worth reporting.
            bonded_tokens: (!validators.is_empty()).then_some(total_power as f64),
        }
    }

    /// Page through `validators` until the reported total is reached.
    async fn fetch_validator_set(&self) -> Result<Vec<WeightedEntity>> {
        let mut entities: Vec<WeightedEntity> = Vec::new();

        for page in 1..=MAX_PAGES {
            let result = self
                .client
                .rpc_call(
                    &self.rpc_url,
                    "validators",
                    json!({"page": page.to_string(), "per_page": PER_PAGE}),
                )
                .await?;

            let total = u64_field(&result, "total")? as usize;
            let page_entities = parse_rpc_validators(&result)?;
            debug!(page, fetched = page_entities.len(), total, "rpc validator page");

            if page_entities.is_empty() {
                break;
            }
            entities.extend(page_entities);
            if entities.len() >= total {
                break;
            }
        }
        Ok(entities)
    }
}

/// Parse one RPC `validators` result page.
pub(crate) fn parse_rpc_validators(result: &serde_json::Value) -> Result<Vec<WeightedEntity>> {
    let mut entities = Vec::new();
    for validator in array_field(result, "validators")? {
        let address = str_field(validator, "address")?;
        let power = u128_field(validator, "voting_power")?;
        entities.push(WeightedEntity::new(address, power));
    }
    Ok(entities)
}
