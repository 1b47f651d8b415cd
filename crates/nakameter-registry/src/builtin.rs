//! The source table shipped with Nakameter.
//!
//! One mapping per live-fetched criterion. Endpoints containing `{chain}`
//! are templated per project by the execution engine; overrides below cover
//! the projects whose ecosystems never adopted the common API shape.

use crate::{SourceConfig, SourceMapping, SourceRegistry, UpdateFrequency};

/// Build the shipped registry.
pub(crate) fn build() -> SourceRegistry {
    SourceRegistry::new()
        .register(SourceMapping {
            criterion: "validator-concentration".into(),
            primary: SourceConfig::new(
                "mintscan",
                "https://apis.mintscan.io/v1/{chain}/validators",
                "validator_voting_power",
            ),
            fallbacks: vec![SourceConfig::new(
                "tendermint-rpc",
                "https://rpc.cosmos.directory/{chain}",
                "rpc_validator_power",
            )],
            update_frequency: UpdateFrequency::Hourly,
            chain_specific: true,
        })
        .register(SourceMapping {
            criterion: "mining-pool-concentration".into(),
            primary: SourceConfig::new(
                "mempool-space",
                "https://mempool.space/api/v1/mining/pools/1w",
                "pool_block_share",
            ),
            fallbacks: vec![SourceConfig::new(
                "blockchair",
                "https://api.blockchair.com/{chain}/stats",
                "pool_distribution",
            )],
            update_frequency: UpdateFrequency::Hourly,
            chain_specific: true,
        })
        .register(SourceMapping {
            criterion: "node-hosting".into(),
            primary: SourceConfig::new(
                "peer-crawler",
                "https://crawler.nakameter.org/v1/{chain}/peers",
                "hosting_provider_sample",
            ),
            fallbacks: vec![],
            update_frequency: UpdateFrequency::Daily,
            chain_specific: true,
        })
        .register(SourceMapping {
            criterion: "client-diversity".into(),
            primary: SourceConfig::new(
                "ethernodes",
                "https://ethernodes.org/api/clients",
                "client_share",
            ),
            fallbacks: vec![SourceConfig::new(
                "peer-crawler",
                "https://crawler.nakameter.org/v1/{chain}/clients",
                "client_share",
            )],
            update_frequency: UpdateFrequency::Daily,
            chain_specific: false,
        })
        .register(SourceMapping {
            criterion: "voter-concentration".into(),
            primary: SourceConfig::new(
                "governance-api",
                "https://api.boardroom.info/v1/protocols/{chain}/voters",
                "voter_power",
            ),
            fallbacks: vec![SourceConfig::new(
                "tally",
                "https://api.tally.xyz/query/voters/{chain}",
                "voter_power",
            )],
            update_frequency: UpdateFrequency::Daily,
            chain_specific: true,
        })
        .register(SourceMapping {
            criterion: "governance-participation".into(),
            primary: SourceConfig::new(
                "governance-api",
                "https://api.boardroom.info/v1/protocols/{chain}/proposals",
                "proposal_turnout",
            ),
            fallbacks: vec![],
            update_frequency: UpdateFrequency::Daily,
            chain_specific: true,
        })
        .register(SourceMapping {
            criterion: "token-distribution".into(),
            primary: SourceConfig::new(
                "blockchair",
                "https://api.blockchair.com/{chain}/addresses",
                "holder_share",
            ),
            fallbacks: vec![],
            update_frequency: UpdateFrequency::Weekly,
            chain_specific: true,
        })
        .register(SourceMapping {
            criterion: "admin-halt-capability".into(),
            primary: SourceConfig::new(
                "curated-assessments",
                "assessments/{chain}.json",
                "assessment_value",
            ),
            fallbacks: vec![],
            update_frequency: UpdateFrequency::Weekly,
            chain_specific: true,
        })
        // Ecosystems with their own API shapes keep their own primaries;
        // the shared fallbacks above still apply.
        .override_primary(
            "osmosis",
            "validator-concentration",
            SourceConfig::new(
                "osmosis-lcd",
                "https://lcd.osmosis.zone/cosmos/staking/v1beta1/validators",
                "lcd_validator_tokens",
            ),
        )
        .override_primary(
            "polkadot",
            "validator-concentration",
            SourceConfig::new(
                "subscan",
                "https://polkadot.api.subscan.io/api/scan/staking/validators",
                "subscan_bonded",
            ),
        )
        .override_primary(
            "bitcoin",
            "node-hosting",
            SourceConfig::new(
                "bitnodes",
                "https://bitnodes.io/api/v1/snapshots/latest/",
                "bitnodes_hosting_sample",
            ),
        )
}
