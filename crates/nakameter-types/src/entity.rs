//! Weighted entities and the records derived from them.

/// A single weight-bearing participant: a validator, a mining pool, a voter.
///
/// Generic over the population being analyzed - concentration analysis only
/// sees identities and non-negative weights.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEntity {
    /// Stable identity within the population (address, pool name, moniker).
    pub identity: String,
    /// Non-negative weight in the source's smallest unit. `u128` because
    /// nano-unit stakes overflow `u64` on large networks.
    pub weight: u128,
}

impl WeightedEntity {
    /// Construct an entity.
    pub fn new(identity: impl Into<String>, weight: u128) -> Self {
        Self {
            identity: identity.into(),
            weight,
        }
    }
}

/// Output of concentration analysis over one weighted-entity list.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcentrationResult {
    /// Minimum number of entities whose combined weight reaches the
    /// attack threshold. Always >= 1.
    pub nakamoto_coefficient: usize,
    /// Share of total weight held by the 5 largest entities, in percent,
    /// rounded to one decimal place.
    pub top5_pct: f64,
    /// Share of total weight held by the 10 largest entities, in percent,
    /// rounded to one decimal place.
    pub top10_pct: f64,
}

/// A sample-derived measurement with deliberately reduced confidence.
///
/// Confidence never reaches 1.0 - a sampled number must stay
/// distinguishable from an exhaustive one even at 100% probe success.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleEstimate {
    /// The estimated value (typically a percentage share).
    pub value: f64,
    /// `min(cap, successes / sample_size)`, cap < 1.0.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_construction() {
        let e = WeightedEntity::new("validator-1", 5_000_000_000_000_000_000u128);
        assert_eq!(e.identity, "validator-1");
        assert!(e.weight > u64::MAX as u128 / 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn concentration_result_serializes_flat() {
        let r = ConcentrationResult {
            nakamoto_coefficient: 4,
            top5_pct: 38.2,
            top10_pct: 55.0,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["nakamoto_coefficient"], 4);
        assert_eq!(json["top5_pct"], 38.2);
    }
}
