//! Governance participation and voter-concentration adapter.
//!
//! Two independent feeds from a governance aggregator: the proposal
//! listing (participation) and the voter listing (voting-power
//! concentration). Token-vote governance is majority-ruled, so voter
//! concentration uses the 1/2 fraction.

use serde::Serialize;
use tracing::warn;

use nakameter_analysis::{concentration, AttackFraction};
use nakameter_client::ProviderClient;
use nakameter_types::{CriterionId, WeightedEntity};

use crate::error::Result;
use crate::extract::{array_field, str_field, u128_field};
use crate::record::{resolved_count, MetricsRecord};

/// Metrics for one protocol's governance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GovernanceMetrics {
    /// Proposals in the listing window.
    pub proposal_count: Option<u64>,
    /// Mean turnout across listed proposals, percent of eligible supply.
    pub average_turnout_pct: Option<f64>,
    /// Voters needed to reach half the listed voting power.
    pub voter_nakamoto_coefficient: Option<u64>,
    /// Voting-power share of the 10 largest voters, percent.
    pub voter_top10_concentration: Option<f64>,
}

impl MetricsRecord for GovernanceMetrics {
    const CORE_METRICS: &'static [&'static str] = &[
        "average_turnout_pct",
        "voter_nakamoto_coefficient",
        "voter_top10_concentration",
    ];

    fn null() -> Self {
        Self {
            proposal_count: None,
            average_turnout_pct: None,
            voter_nakamoto_coefficient: None,
            voter_top10_concentration: None,
        }
    }

    fn core_resolved(&self) -> usize {
        resolved_count(&[
            self.average_turnout_pct.is_some(),
            self.voter_nakamoto_coefficient.is_some(),
            self.voter_top10_concentration.is_some(),
        ])
    }

    fn criterion_values(&self) -> Vec<(CriterionId, Option<f64>)> {
        vec![
            (
                "governance-participation".into(),
                self.average_turnout_pct,
            ),
            (
                "voter-concentration".into(),
                self.voter_top10_concentration,
            ),
        ]
    }
}

/// Adapter for governance-aggregator APIs.
pub struct GovernanceAdapter {
    client: ProviderClient,
    base_url: String,
}

impl GovernanceAdapter {
    /// Adapter against `base_url` (no trailing slash).
    pub fn new(client: ProviderClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch and reduce every metric this adapter serves.
    ///
    /// Proposal and voter feeds fail independently: a dead voter endpoint
    /// still leaves turnout resolvable, and vice versa.
    pub async fn get_all_metrics(&self) -> GovernanceMetrics {
        let (proposals, voters) = tokio::join!(self.fetch_proposals(), self.fetch_voters());

        let proposals = match proposals {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "proposal listing unavailable");
                None
            }
        };
        let voters = match voters {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "voter listing unavailable");
                None
            }
        };

        let conc = voters
            .as_deref()
            .and_then(|set| concentration(set, AttackFraction::HALF));

        GovernanceMetrics {
            proposal_count: proposals.as_ref().map(|t| t.len() as u64),
            average_turnout_pct: proposals.as_deref().and_then(average_turnout),
            voter_nakamoto_coefficient: conc.map(|c| c.nakamoto_coefficient as u64),
            voter_top10_concentration: conc.map(|c| c.top10_pct),
        }
    }

    async fn fetch_proposals(&self) -> Result<Vec<f64>> {
        let url = format!("{}/proposals", self.base_url);
        let body = self.client.get_json(&url).await?;
        parse_proposal_turnouts(&body)
    }

    async fn fetch_voters(&self) -> Result<Vec<WeightedEntity>> {
        let url = format!("{}/voters", self.base_url);
        let body = self.client.get_json(&url).await?;
        parse_voters(&body)
    }
}

/// Per-proposal turnout fractions from the listing.
///
/// Proposals without a turnout figure (still open, or the aggregator lost
/// the tally) are skipped, not treated as zero turnout.
pub(crate) fn parse_proposal_turnouts(body: &serde_json::Value) -> Result<Vec<f64>> {
    let mut turnouts = Vec::new();
    for proposal in array_field(body, "proposals")? {
        if let Some(turnout) = proposal.get("turnout").and_then(|t| t.as_f64()) {
            turnouts.push(turnout);
        }
    }
    Ok(turnouts)
}

/// Voter listing into voting-power weights.
pub(crate) fn parse_voters(body: &serde_json::Value) -> Result<Vec<WeightedEntity>> {
    let mut entities = Vec::new();
    for voter in array_field(body, "voters")? {
        let address = str_field(voter, "address")?;
        let power = u128_field(voter, "power")?;
        entities.push(WeightedEntity::new(address, power));
    }
    Ok(entities)
}

/// Mean of per-proposal turnout fractions, as a percentage.
fn average_turnout(turnouts: &[f64]) -> Option<f64> {
    if turnouts.is_empty() {
        return None;
    }
    let mean = turnouts.iter().sum::<f64>() / turnouts.len() as f64;
    Some((mean * 1000.0).round() / 10.0)
}
