//! Node-hosting decentralization via population sampling.
//!
//! Classifying every reachable peer needs one detail call per node, and the
//! crawler sees tens of thousands of them - far past any request budget.
//! Instead: one cheap bulk snapshot for the peer list, then a bounded
//! random sample probed through the rate-limited client, classified against
//! a known-hosting-provider table. The result carries a capped confidence
//! so it can never pass for an exhaustive census.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use nakameter_analysis::Sampler;
use nakameter_client::ProviderClient;
use nakameter_types::CriterionId;

use crate::error::Result;
use crate::extract::array_field;
use crate::record::{resolved_count, MetricsRecord};

/// Substrings identifying datacenter/cloud operators in ISP names.
pub const HOSTING_PROVIDERS: &[&str] = &[
    "amazon",
    "aws",
    "google",
    "microsoft",
    "azure",
    "hetzner",
    "ovh",
    "digitalocean",
    "alibaba",
    "oracle",
    "contabo",
    "linode",
    "vultr",
    "scaleway",
    "tencent",
];

/// Default number of peers to probe per pass.
const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Where a node runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostClass {
    /// A known datacenter/cloud operator.
    Hosted,
    /// Anything else: residential, institutional, unidentified ISPs.
    Other,
}

/// Metrics for one chain's peer-to-peer node population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostingMetrics {
    /// Reachable peers in the bulk snapshot.
    pub peer_count: Option<u64>,
    /// Estimated share of nodes on hosting providers, percent.
    pub hosted_share: Option<f64>,
    /// Confidence of the hosted-share estimate (sample-derived, < 1.0).
    pub hosted_confidence: Option<f64>,
}

impl MetricsRecord for HostingMetrics {
    const CORE_METRICS: &'static [&'static str] = &["peer_count", "hosted_share"];

    fn null() -> Self {
        Self {
            peer_count: None,
            hosted_share: None,
            hosted_confidence: None,
        }
    }

    fn core_resolved(&self) -> usize {
        resolved_count(&[self.peer_count.is_some(), self.hosted_share.is_some()])
    }

    fn criterion_values(&self) -> Vec<(CriterionId, Option<f64>)> {
        vec![("node-hosting".into(), self.hosted_share)]
    }
}

/// Adapter estimating hosting concentration from a peer crawler.
pub struct NodeHostingAdapter {
    client: ProviderClient,
    base_url: String,
    sampler: Sampler,
}

impl NodeHostingAdapter {
    /// Adapter against `base_url` (no trailing slash).
    pub fn new(client: ProviderClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            sampler: Sampler::new(DEFAULT_SAMPLE_SIZE),
        }
    }

    /// Override the sampler (sample size / confidence cap).
    #[must_use]
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Fetch and reduce every metric this adapter serves.
    pub async fn get_all_metrics(&self) -> HostingMetrics {
        self.get_all_metrics_with_rng(&mut rand::thread_rng()).await
    }

    /// Deterministic variant: the caller owns the sampling randomness.
    ///
    /// The bulk snapshot failing nulls the whole record. Zero successful
    /// probes nulls the estimate but keeps the peer count - the snapshot
    /// itself still measured something.
    pub async fn get_all_metrics_with_rng<R: Rng>(&self, rng: &mut R) -> HostingMetrics {
        let peers = match self.fetch_peer_ids().await {
            Ok(p) => p,
            Err(e) => {
                warn!(provider = %self.client.provider(), error = %e, "peer snapshot unavailable");
                return HostingMetrics::null();
            }
        };
        let peer_count = peers.len() as u64;

        let outcome = self
            .sampler
            .estimate(peers, rng, |peer| self.classify_peer(peer))
            .await;

        match outcome {
            Some(outcome) => HostingMetrics {
                peer_count: Some(peer_count),
                hosted_share: Some(outcome.share_of(&HostClass::Hosted)),
                hosted_confidence: Some(outcome.confidence()),
            },
            None => {
                warn!(provider = %self.client.provider(), "no peer probe succeeded, hosting share unresolved");
                HostingMetrics {
                    peer_count: Some(peer_count),
                    hosted_share: None,
                    hosted_confidence: None,
                }
            }
        }
    }

    /// One cheap bulk call for the full peer identifier list.
    async fn fetch_peer_ids(&self) -> Result<Vec<String>> {
        let url = format!("{}/peers", self.base_url);
        let body = self.client.get_json(&url).await?;
        let peers = array_field(&body, "peers")?
            .iter()
            .filter_map(|p| p.as_str().map(str::to_owned))
            .collect();
        Ok(peers)
    }

    /// One detail call for one sampled peer. Failure is tolerated: the
    /// sampler counts it against confidence, nothing else.
    async fn classify_peer(&self, peer: String) -> Option<HostClass> {
        let url = format!("{}/peers/{}", self.base_url, peer);
        match self.client.get_json(&url).await {
            Ok(body) => {
                let isp = body
                    .get("isp")
                    .or_else(|| body.get("org"))
                    .and_then(|v| v.as_str())?;
                Some(classify_isp(isp))
            }
            Err(e) => {
                debug!(peer = %peer, error = %e, "peer probe failed");
                None
            }
        }
    }
}

/// Match an ISP/organization name against the hosting-provider table.
pub(crate) fn classify_isp(isp: &str) -> HostClass {
    let lower = isp.to_lowercase();
    if HOSTING_PROVIDERS.iter().any(|p| lower.contains(p)) {
        HostClass::Hosted
    } else {
        HostClass::Other
    }
}
