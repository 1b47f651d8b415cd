//! Nakamoto coefficient and top-N concentration.
//!
//! The coefficient is the smallest prefix of the stake-descending entity
//! list whose cumulative weight reaches a chain-specific attack threshold.
//! Minimality invariant: the top `(coefficient - 1)` entities are strictly
//! below the threshold.

use nakameter_types::{ConcentrationResult, WeightedEntity};

/// The majority/attack fraction for a consensus family.
///
/// Kept as an exact rational so threshold comparisons stay in integer
/// arithmetic. Commonly 1/3 for BFT validator sets and 1/2 for PoW pools or
/// token-weighted votes - a parameter, not a universal constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackFraction {
    num: u32,
    den: u32,
}

impl AttackFraction {
    /// BFT liveness threshold: a third of total weight.
    pub const ONE_THIRD: AttackFraction = AttackFraction { num: 1, den: 3 };

    /// Majority threshold: half of total weight.
    pub const HALF: AttackFraction = AttackFraction { num: 1, den: 2 };

    /// An arbitrary fraction `num/den`. Returns `None` unless
    /// `0 < num <= den`.
    pub const fn new(num: u32, den: u32) -> Option<AttackFraction> {
        if num == 0 || den == 0 || num > den {
            None
        } else {
            Some(AttackFraction { num, den })
        }
    }

    /// Numerator.
    pub const fn num(&self) -> u32 {
        self.num
    }

    /// Denominator.
    pub const fn den(&self) -> u32 {
        self.den
    }
}

/// Concentration analysis over a weighted-entity list.
///
/// Returns `None` when the list is empty or carries zero total weight -
/// the caller must treat that as a null measurement, never as zero
/// concentration.
///
/// The result is a function of the entity *set*: input order never matters,
/// and ties in weight are broken by identity so equal inputs give equal
/// outputs.
pub fn concentration(
    entities: &[WeightedEntity],
    fraction: AttackFraction,
) -> Option<ConcentrationResult> {
    let total: u128 = entities.iter().map(|e| e.weight).sum();
    if total == 0 {
        return None;
    }

    let mut sorted: Vec<&WeightedEntity> = entities.iter().collect();
    sorted.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.identity.cmp(&b.identity))
    });

    let num = u128::from(fraction.num);
    let den = u128::from(fraction.den);

    // Walk the descending list until the cumulative weight first reaches
    // threshold = total * num/den, inclusive of the crossing entity.
    let mut cumulative: u128 = 0;
    let mut coefficient = sorted.len();
    for (i, entity) in sorted.iter().enumerate() {
        cumulative += entity.weight;
        if cumulative * den >= total * num {
            coefficient = i + 1;
            break;
        }
    }

    let top_share = |n: usize| -> f64 {
        let sum: u128 = sorted.iter().take(n).map(|e| e.weight).sum();
        round1(sum as f64 / total as f64 * 100.0)
    };

    Some(ConcentrationResult {
        nakamoto_coefficient: coefficient,
        top5_pct: top_share(5),
        top10_pct: top_share(10),
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
