//! Cosmos SDK staking adapter.
//!
//! Reads the bonded validator set from a chain's LCD endpoint
//! (`/cosmos/staking/v1beta1/...`). Stakes arrive as decimal strings in
//! nano-units (`uatom` and friends, typically 10^6 sub-units per token) and
//! routinely exceed 2^53, so they are parsed exactly into `u128` before any
//! division happens.

use serde::Serialize;
use tracing::{debug, warn};

use nakameter_analysis::{concentration, AttackFraction};
use nakameter_client::ProviderClient;
use nakameter_types::{CriterionId, WeightedEntity};

use crate::error::Result;
use crate::extract::{array_field, field, str_field, subunits_to_whole, u128_field};
use crate::record::{resolved_count, MetricsRecord};

/// Upper bound on pagination walks; a healthy chain fits well within it.
const MAX_PAGES: usize = 10;

/// Validators requested per page.
const PAGE_LIMIT: &str = "500";

/// Metrics for one staking-secured chain.
///
/// Shared by the LCD adapter and the Tendermint RPC fallback - both resolve
/// the same criterion family from different wire shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakingMetrics {
    /// Number of bonded validators.
    pub validator_count: Option<u64>,
    /// Entities needed to reach the 1/3 attack threshold.
    pub nakamoto_coefficient: Option<u64>,
    /// Stake share of the 5 largest validators, percent.
    pub top5_concentration: Option<f64>,
    /// Stake share of the 10 largest validators, percent.
    pub top10_concentration: Option<f64>,
    /// Total bonded stake in whole tokens.
    pub bonded_tokens: Option<f64>,
}

impl MetricsRecord for StakingMetrics {
    const CORE_METRICS: &'static [&'static str] =
        &["nakamoto_coefficient", "top10_concentration", "bonded_tokens"];

    fn null() -> Self {
        Self {
            validator_count: None,
            nakamoto_coefficient: None,
            top5_concentration: None,
            top10_concentration: None,
            bonded_tokens: None,
        }
    }

    fn core_resolved(&self) -> usize {
        resolved_count(&[
            self.nakamoto_coefficient.is_some(),
            self.top10_concentration.is_some(),
            self.bonded_tokens.is_some(),
        ])
    }

    fn criterion_values(&self) -> Vec<(CriterionId, Option<f64>)> {
        vec![
            (
                "nakamoto-coefficient".into(),
                self.nakamoto_coefficient.map(|n| n as f64),
            ),
            ("top10-concentration".into(), self.top10_concentration),
        ]
    }
}

/// Adapter for Cosmos SDK LCD staking endpoints.
pub struct CosmosStakingAdapter {
    client: ProviderClient,
    base_url: String,
    /// Sub-units per whole token, as a power of ten (6 for `uatom`).
    stake_exponent: u32,
}

impl CosmosStakingAdapter {
    /// Adapter against `base_url` (no trailing slash).
    pub fn new(client: ProviderClient, base_url: impl Into<String>, stake_exponent: u32) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            stake_exponent,
        }
    }

    /// Fetch and reduce every metric this adapter serves.
    ///
    /// Never fails: the validator walk and the pool lookup run concurrently,
    /// each failure nulls only its own fields, and a total failure yields
    /// the all-null record.
    pub async fn get_all_metrics(&self) -> StakingMetrics {
        let (validators, bonded) = tokio::join!(self.fetch_validator_set(), self.fetch_bonded());

        let validators = match validators {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "validator set unavailable");
                None
            }
        };
        let bonded = match bonded {
            Ok(b) => Some(b),
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "bonded pool unavailable");
                None
            }
        };

        let conc = validators
            .as_deref()
            .and_then(|set| concentration(set, AttackFraction::ONE_THIRD));

        StakingMetrics {
            validator_count: validators.as_ref().map(|v| v.len() as u64),
            nakamoto_coefficient: conc.map(|c| c.nakamoto_coefficient as u64),
            top5_concentration: conc.map(|c| c.top5_pct),
            top10_concentration: conc.map(|c| c.top10_pct),
            bonded_tokens: bonded,
        }
    }

    /// Walk the paginated bonded-validator listing.
    ///
    /// Pages are necessarily sequential - each needs the previous page's
    /// `next_key`.
    async fn fetch_validator_set(&self) -> Result<Vec<WeightedEntity>> {
        let url = format!("{}/cosmos/staking/v1beta1/validators", self.base_url);
        let mut entities = Vec::new();
        let mut next_key: Option<String> = None;

        for page in 0..MAX_PAGES {
            let mut query = vec![
                ("status", "BOND_STATUS_BONDED"),
                ("pagination.limit", PAGE_LIMIT),
            ];
            if let Some(key) = &next_key {
                query.push(("pagination.key", key.as_str()));
            }

            let body = self.client.get_json_with_query(&url, &query).await?;
            let (mut page_entities, key) = parse_validator_page(&body)?;
            debug!(page, fetched = page_entities.len(), "validator page");
            entities.append(&mut page_entities);

            match key {
                Some(k) => next_key = Some(k),
                None => break,
            }
        }
        Ok(entities)
    }

    async fn fetch_bonded(&self) -> Result<f64> {
        let url = format!("{}/cosmos/staking/v1beta1/pool", self.base_url);
        let body = self.client.get_json(&url).await?;
        let pool = field(&body, "pool")?;
        let bonded = u128_field(pool, "bonded_tokens")?;
        Ok(subunits_to_whole(bonded, self.stake_exponent))
    }
}

/// Parse one validators page into weighted entities plus the next page key.
pub(crate) fn parse_validator_page(body: &serde_json::Value) -> Result<(Vec<WeightedEntity>, Option<String>)> {
    let mut entities = Vec::new();
    for validator in array_field(body, "validators")? {
        let identity = validator
            .get("description")
            .and_then(|d| d.get("moniker"))
            .and_then(|m| m.as_str())
            .map(str::to_owned)
            .unwrap_or_else(|| {
                str_field(validator, "operator_address")
                    .unwrap_or("unknown")
                    .to_owned()
            });
        let tokens = u128_field(validator, "tokens")?;
        entities.push(WeightedEntity::new(identity, tokens));
    }

    let next_key = body
        .get("pagination")
        .and_then(|p| p.get("next_key"))
        .and_then(|k| k.as_str())
        .map(str::to_owned);

    Ok((entities, next_key))
}
