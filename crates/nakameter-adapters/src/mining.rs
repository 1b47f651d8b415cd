//! Mining-pool concentration adapter.
//!
//! Reads the per-pool block counts over a recent window (mempool.space API
//! shape) and treats blocks-won as the pool's weight. PoW attack math uses
//! the majority fraction: reorganization needs half the hashrate, not a
//! third of it.

use serde::Serialize;
use tracing::warn;

use nakameter_analysis::{concentration, AttackFraction};
use nakameter_client::ProviderClient;
use nakameter_types::{CriterionId, WeightedEntity};

use crate::error::Result;
use crate::extract::{array_field, field, str_field, u64_field};
use crate::record::{resolved_count, MetricsRecord};

/// Metrics for one proof-of-work chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningMetrics {
    /// Pools that won at least one block in the window.
    pub pool_count: Option<u64>,
    /// Pools needed to reach half the window's blocks.
    pub nakamoto_coefficient: Option<u64>,
    /// Block share of the 5 largest pools, percent.
    pub top5_concentration: Option<f64>,
    /// Block share of the 10 largest pools, percent.
    pub top10_concentration: Option<f64>,
    /// Block share of the single largest pool, percent.
    pub dominant_pool_share: Option<f64>,
    /// Network hashrate in EH/s.
    pub network_hashrate_ehs: Option<f64>,
}

impl MetricsRecord for MiningMetrics {
    const CORE_METRICS: &'static [&'static str] = &[
        "nakamoto_coefficient",
        "top10_concentration",
        "network_hashrate_ehs",
    ];

    fn null() -> Self {
        Self {
            pool_count: None,
            nakamoto_coefficient: None,
            top5_concentration: None,
            top10_concentration: None,
            dominant_pool_share: None,
            network_hashrate_ehs: None,
        }
    }

    fn core_resolved(&self) -> usize {
        resolved_count(&[
            self.nakamoto_coefficient.is_some(),
            self.top10_concentration.is_some(),
            self.network_hashrate_ehs.is_some(),
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

/// Adapter for mempool.space-style mining APIs.
pub struct MiningPoolsAdapter {
    client: ProviderClient,
    base_url: String,
}

impl MiningPoolsAdapter {
    /// Adapter against `base_url` (no trailing slash).
    pub fn new(client: ProviderClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch and reduce every metric this adapter serves.
    ///
    /// Pool listing and hashrate are independent calls: they run
    /// concurrently and fail independently.
    pub async fn get_all_metrics(&self) -> MiningMetrics {
        let (pools, hashrate) = tokio::join!(self.fetch_pools(), self.fetch_hashrate());

        let pools = match pools {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "pool listing unavailable");
                None
            }
        };
        let hashrate = match hashrate {
            Ok(h) => Some(h),
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "hashrate unavailable");
                None
            }
        };

        let conc = pools
            .as_deref()
            .and_then(|set| concentration(set, AttackFraction::HALF));
        let dominant = pools.as_deref().and_then(dominant_share);

        MiningMetrics {
            pool_count: pools.as_ref().map(|p| p.len() as u64),
            nakamoto_coefficient: conc.map(|c| c.nakamoto_coefficient as u64),
            top5_concentration: conc.map(|c| c.top5_pct),
            top10_concentration: conc.map(|c| c.top10_pct),
            dominant_pool_share: dominant,
            network_hashrate_ehs: hashrate,
        }
    }

    async fn fetch_pools(&self) -> Result<Vec<WeightedEntity>> {
        let url = format!("{}/api/v1/mining/pools/1w", self.base_url);
        let body = self.client.get_json(&url).await?;
        parse_pools(&body)
    }

    async fn fetch_hashrate(&self) -> Result<f64> {
        let url = format!("{}/api/v1/mining/hashrate/3d", self.base_url);
        let body = self.client.get_json(&url).await?;
        let value = field(&body, "currentHashrate")?;
        let raw = value
            .as_f64()
            .ok_or_else(|| crate::error::AdapterError::Malformed {
                field: "currentHashrate",
                value: value.to_string(),
            })?;
        // H/s -> EH/s
        Ok(raw / 1e18)
    }
}

/// Parse the windowed pool listing into block-count weights.
pub(crate) fn parse_pools(body: &serde_json::Value) -> Result<Vec<WeightedEntity>> {
    let mut entities = Vec::new();
    for pool in array_field(body, "pools")? {
        let name = str_field(pool, "name")?;
        let blocks = u64_field(pool, "blockCount")?;
        entities.push(WeightedEntity::new(name, u128::from(blocks)));
    }
    Ok(entities)
}

/// Share of total weight held by the single largest entity, percent.
fn dominant_share(entities: &[WeightedEntity]) -> Option<f64> {
    let total: u128 = entities.iter().map(|e| e.weight).sum();
    if total == 0 {
        return None;
    }
    let max = entities.iter().map(|e| e.weight).max()?;
    Some((max as f64 / total as f64 * 1000.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pools(counts: &[(&str, u64)]) -> serde_json::Value {
        json!({
            "pools": counts.iter().map(|(name, blocks)| json!({
                "name": name,
                "blockCount": blocks,
            })).collect::<Vec<_>>(),
        })
    }

    #[test]
    fn parses_pool_weights() {
        let body = pools(&[("Foundry USA", 438), ("AntPool", 256), ("ViaBTC", 150)]);
        let entities = parse_pools(&body).unwrap();
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0].identity, "Foundry USA");
        assert_eq!(entities[0].weight, 438);
    }

    #[test]
    fn dominant_share_rounds_to_one_decimal() {
        let entities = vec![
            WeightedEntity::new("a", 438),
            WeightedEntity::new("b", 256),
            WeightedEntity::new("c", 306),
        ];
        // 438 / 1000 = 43.8%
        assert_eq!(dominant_share(&entities), Some(43.8));
    }

    #[test]
    fn dominant_share_of_nothing_is_none() {
        assert_eq!(dominant_share(&[]), None);
        assert_eq!(dominant_share(&[WeightedEntity::new("a", 0)]), None);
    }

    #[test]
    fn mining_record_criteria_use_half_threshold_results() {
        let record = MiningMetrics {
            pool_count: Some(12),
            nakamoto_coefficient: Some(2),
            top5_concentration: Some(81.0),
            top10_concentration: Some(97.5),
            dominant_pool_share: Some(31.2),
            network_hashrate_ehs: Some(650.0),
        };
        let values = record.criterion_values();
        assert!(values.contains(&("nakamoto-coefficient".into(), Some(2.0))));
        assert!(values.contains(&("top10-concentration".into(), Some(97.5))));
    }
}
