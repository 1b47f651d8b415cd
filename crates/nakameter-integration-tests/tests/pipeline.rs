//! End-to-end pipeline tests: fixture upstream -> adapter -> analysis ->
//! scoring -> snapshot, entirely against localhost.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use nakameter_adapters::{
    CosmosStakingAdapter, MetricsRecord, MiningPoolsAdapter, NodeHostingAdapter, ProjectSnapshot,
    TendermintRpcAdapter,
};
use nakameter_analysis::Sampler;
use nakameter_client::{ClientConfig, ProviderClient};
use nakameter_integration_tests::{init_tracing, FixtureServer};
use nakameter_registry::SourceRegistry;
use nakameter_scoring::{ScoringEngine, KILL_SWITCH_CEILING};
use nakameter_types::{CriterionId, FetchStatus};

fn test_client(provider: &'static str) -> ProviderClient {
    ProviderClient::new(provider.into(), ClientConfig::default().with_rate_limit(0))
}

fn validators_page() -> serde_json::Value {
    // Fixture A distribution: [50, 20, 15, 10, 5] in 10^18 nano-units.
    let weights: [u128; 5] = [50, 20, 15, 10, 5];
    json!({
        "validators": weights.iter().enumerate().map(|(i, w)| json!({
            "operator_address": format!("cosmosvaloper{i}"),
            "description": {"moniker": format!("val-{i}")},
            "tokens": (w * 1_000_000_000_000_000_000).to_string(),
        })).collect::<Vec<_>>(),
        "pagination": {"next_key": null, "total": "5"},
    })
}

fn staking_pool() -> serde_json::Value {
    json!({"pool": {"bonded_tokens": "245000000000000", "not_bonded_tokens": "1200000000"}})
}

#[tokio::test]
async fn staking_pipeline_scores_and_snapshots() {
    init_tracing();
    let server = FixtureServer::start([
        ("/cosmos/staking/v1beta1/validators", validators_page()),
        ("/cosmos/staking/v1beta1/pool", staking_pool()),
    ])
    .await;

    let adapter = CosmosStakingAdapter::new(test_client("mintscan"), server.url(), 6);
    let metrics = adapter.get_all_metrics().await;

    // Fixture A: dominant entity crosses 1/3 alone.
    assert_eq!(metrics.validator_count, Some(5));
    assert_eq!(metrics.nakamoto_coefficient, Some(1));
    assert_eq!(metrics.top5_concentration, Some(100.0));
    assert_eq!(metrics.top10_concentration, Some(100.0));
    assert_eq!(metrics.bonded_tokens, Some(245_000_000.0));

    // Fold live metrics with curated assessments into the scoring engine.
    let mut values: HashMap<CriterionId, Option<f64>> =
        metrics.criterion_values().into_iter().collect();
    values.insert("admin-halt-capability".into(), Some(9.0));
    values.insert("governance-participation".into(), Some(40.0));

    let score = ScoringEngine::new().calculate_project_scores(&values);
    assert!(!score.kill_switch_active);
    // chain = mean(coefficient 1 -> 1.0, top10 100% -> 0.0) = 0.5
    // control = 9.0, fairness = 4.0
    // total = 0.4*0.5 + 0.4*9.0 + 0.2*4.0 = 4.6
    assert!((score.total_score - 4.6).abs() < 1e-9);

    let snapshot = ProjectSnapshot::assemble("mintscan", &metrics, score.total_score);
    assert_eq!(snapshot.fetch_status, FetchStatus::Success);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["fetchStatus"], "success");
    assert_eq!(json["metrics"]["validator_count"], 5);
}

#[tokio::test]
async fn missing_sibling_endpoint_degrades_to_partial() {
    init_tracing();
    // Pool endpoint absent: bonded_tokens nulls, concentration survives.
    let server =
        FixtureServer::start([("/cosmos/staking/v1beta1/validators", validators_page())]).await;

    let adapter = CosmosStakingAdapter::new(test_client("mintscan"), server.url(), 6);
    let metrics = adapter.get_all_metrics().await;

    assert_eq!(metrics.nakamoto_coefficient, Some(1));
    assert_eq!(metrics.bonded_tokens, None);
    assert_eq!(metrics.fetch_status(), FetchStatus::Partial);
}

#[tokio::test]
async fn dead_upstream_yields_all_null_and_failed() {
    init_tracing();
    let server = FixtureServer::start(Vec::<(&str, serde_json::Value)>::new()).await;

    let adapter = CosmosStakingAdapter::new(test_client("mintscan"), server.url(), 6);
    let metrics = adapter.get_all_metrics().await;

    assert_eq!(metrics, nakameter_adapters::StakingMetrics::null());
    assert_eq!(metrics.fetch_status(), FetchStatus::Failed);
}

#[tokio::test]
async fn tendermint_rpc_fallback_serves_the_same_family() {
    init_tracing();
    // Fixture B distribution: [21, 21, 21, 21, 16] -> coefficient 2.
    let server = FixtureServer::start([(
        "/",
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "block_height": "19422000",
                "validators": [
                    {"address": "V1", "voting_power": "21"},
                    {"address": "V2", "voting_power": "21"},
                    {"address": "V3", "voting_power": "21"},
                    {"address": "V4", "voting_power": "21"},
                    {"address": "V5", "voting_power": "16"},
                ],
                "count": "5",
                "total": "5",
            },
        }),
    )])
    .await;

    let adapter = TendermintRpcAdapter::new(test_client("tendermint-rpc"), server.url());
    let metrics = adapter.get_all_metrics().await;

    assert_eq!(metrics.validator_count, Some(5));
    assert_eq!(metrics.nakamoto_coefficient, Some(2));
    assert_eq!(metrics.bonded_tokens, Some(100.0));
}

#[tokio::test]
async fn mining_pools_use_the_majority_fraction() {
    init_tracing();
    let server = FixtureServer::start([
        (
            "/api/v1/mining/pools/1w",
            json!({
                "pools": [
                    {"name": "Foundry USA", "blockCount": 350},
                    {"name": "AntPool", "blockCount": 250},
                    {"name": "ViaBTC", "blockCount": 200},
                    {"name": "F2Pool", "blockCount": 120},
                    {"name": "Binance Pool", "blockCount": 80},
                ],
            }),
        ),
        (
            "/api/v1/mining/hashrate/3d",
            json!({"currentHashrate": 6.5e20, "currentDifficulty": 8.1e13}),
        ),
    ])
    .await;

    let adapter = MiningPoolsAdapter::new(test_client("mempool-space"), server.url());
    let metrics = adapter.get_all_metrics().await;

    // 350 < 500, 350+250 = 600 >= 500: two pools reach half the blocks.
    assert_eq!(metrics.nakamoto_coefficient, Some(2));
    assert_eq!(metrics.dominant_pool_share, Some(35.0));
    assert_eq!(metrics.network_hashrate_ehs, Some(650.0));
    assert_eq!(metrics.fetch_status(), FetchStatus::Success);
}

#[tokio::test]
async fn hosting_sampling_estimates_with_capped_confidence() {
    init_tracing();
    // 30 peers, 18 on hosting providers: exact share is 60%.
    let mut routes: Vec<(String, serde_json::Value)> = vec![(
        "/peers".to_string(),
        json!({"peers": (0..30).map(|i| format!("p{i}")).collect::<Vec<_>>()}),
    )];
    for i in 0..30 {
        let isp = if i < 18 {
            "Hetzner Online GmbH"
        } else {
            "Deutsche Telekom AG"
        };
        routes.push((format!("/peers/p{i}"), json!({"isp": isp})));
    }
    let server = FixtureServer::start(routes).await;

    let adapter = NodeHostingAdapter::new(test_client("peer-crawler"), server.url())
        .with_sampler(Sampler::new(30));
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let metrics = adapter.get_all_metrics_with_rng(&mut rng).await;

    assert_eq!(metrics.peer_count, Some(30));
    // Sample covers the full population, so the share is exact...
    assert_eq!(metrics.hosted_share, Some(60.0));
    // ...but the confidence stays capped: this is still a sampled number.
    assert_eq!(metrics.hosted_confidence, Some(0.75));
}

#[tokio::test]
async fn failed_probes_null_the_estimate_but_keep_the_count() {
    init_tracing();
    // Peer list resolves, every detail probe 404s.
    let server = FixtureServer::start([(
        "/peers",
        json!({"peers": (0..10).map(|i| format!("p{i}")).collect::<Vec<_>>()}),
    )])
    .await;

    let adapter = NodeHostingAdapter::new(test_client("peer-crawler"), server.url())
        .with_sampler(Sampler::new(10));
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let metrics = adapter.get_all_metrics_with_rng(&mut rng).await;

    assert_eq!(metrics.peer_count, Some(10));
    assert_eq!(metrics.hosted_share, None);
    assert_eq!(metrics.fetch_status(), FetchStatus::Partial);
}

#[tokio::test]
async fn kill_switch_caps_the_snapshot_score() {
    init_tracing();
    let server = FixtureServer::start([
        ("/cosmos/staking/v1beta1/validators", validators_page()),
        ("/cosmos/staking/v1beta1/pool", staking_pool()),
    ])
    .await;

    let adapter = CosmosStakingAdapter::new(test_client("mintscan"), server.url(), 6);
    let metrics = adapter.get_all_metrics().await;

    let mut values: HashMap<CriterionId, Option<f64>> =
        metrics.criterion_values().into_iter().collect();
    // Confirmed unilateral halt power.
    values.insert("admin-halt-capability".into(), Some(1.0));
    values.insert("governance-participation".into(), Some(90.0));

    let score = ScoringEngine::new().calculate_project_scores(&values);
    assert!(score.kill_switch_active);
    assert_eq!(score.total_score, KILL_SWITCH_CEILING);
    assert!(score.uncapped_score > KILL_SWITCH_CEILING);

    let snapshot = ProjectSnapshot::assemble("mintscan", &metrics, score.total_score);
    assert_eq!(snapshot.total_score, KILL_SWITCH_CEILING);
}

#[tokio::test]
async fn registry_resolution_selects_the_adapter_endpoint() {
    init_tracing();
    let registry = SourceRegistry::builtin();

    // Default projects resolve to the shared primary...
    let generic = registry
        .resolve(&"validator-concentration".into(), &"cosmos".into())
        .unwrap();
    assert_eq!(generic.primary.provider, "mintscan".into());

    // ...overridden projects get their bespoke primary, shared fallbacks.
    let osmosis = registry
        .resolve(&"validator-concentration".into(), &"osmosis".into())
        .unwrap();
    assert_eq!(osmosis.primary.provider, "osmosis-lcd".into());
    let fallbacks: Vec<_> = osmosis.sources().skip(1).collect();
    assert_eq!(fallbacks[0].provider, "tendermint-rpc".into());

    // The execution engine would now walk primary -> fallback; simulate the
    // fallback leg against the fixture RPC.
    let server = FixtureServer::start([(
        "/",
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"validators": [{"address": "V1", "voting_power": "10"}], "count": "1", "total": "1"},
        }),
    )])
    .await;
    let fallback = TendermintRpcAdapter::new(test_client("tendermint-rpc"), server.url());
    let metrics = fallback.get_all_metrics().await;
    assert_eq!(metrics.nakamoto_coefficient, Some(1));
}
