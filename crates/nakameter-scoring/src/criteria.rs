//! The criteria catalog: what we score and how raw values become sub-scores.

use tracing::warn;

use nakameter_types::{Category, CriterionId, Direction};

/// How a raw domain value maps onto the 0-10 sub-score scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Clamped linear interpolation: `floor` maps to 0, `ceiling` to 10.
    Linear {
        /// Raw value scoring 0.
        floor: f64,
        /// Raw value scoring 10.
        ceiling: f64,
    },
    /// Count-style: `raw / target * 10`, saturating at 10. Used for
    /// coefficients where "enough is enough" - a Nakamoto coefficient of
    /// 40 is not four times better than 10.
    Saturating {
        /// Raw value at which the sub-score saturates.
        target: f64,
    },
    /// The raw value is already a curated 0-10 assessment.
    Assessment,
}

/// One scoring input: category membership, direction, normalization rule.
#[derive(Debug, Clone)]
pub struct Criterion {
    /// Identifier matching the adapter/registry criterion ids.
    pub id: CriterionId,
    /// The single category this criterion belongs to.
    pub category: Category,
    /// Whether a larger raw value means more decentralization.
    pub direction: Direction,
    /// Raw-to-sub-score rule.
    pub normalization: Normalization,
}

impl Criterion {
    /// Map a raw value to a direction-aware 0-10 sub-score.
    ///
    /// Raw values outside the declared domain are clamped in and logged -
    /// a bad upstream number must not leak an out-of-range score downstream.
    pub fn normalize(&self, raw: f64) -> f64 {
        let score = match self.normalization {
            Normalization::Linear { floor, ceiling } => {
                let clamped = clamp_logged(&self.id, raw, floor, ceiling);
                (clamped - floor) / (ceiling - floor) * 10.0
            }
            Normalization::Saturating { target } => {
                let clamped = clamp_logged(&self.id, raw, 0.0, f64::INFINITY);
                (clamped / target * 10.0).min(10.0)
            }
            Normalization::Assessment => clamp_logged(&self.id, raw, 0.0, 10.0),
        };

        match self.direction {
            Direction::HigherIsBetter => score,
            Direction::LowerIsBetter => 10.0 - score,
        }
    }
}

fn clamp_logged(id: &CriterionId, raw: f64, lo: f64, hi: f64) -> f64 {
    if raw < lo || raw > hi {
        warn!(criterion = %id, raw, lo, hi, "raw value outside declared domain, clamping");
    }
    raw.clamp(lo, hi)
}

/// The shipped criteria catalog.
///
/// Chain and Control carry 0.4 weight each, Fairness 0.2; the weights live
/// in the engine. Raw domains here mirror what the adapters emit:
/// percentages in [0,100], coefficients as counts, assessments on 0-10.
pub fn catalog() -> Vec<Criterion> {
    vec![
        // Chain: base-layer operation.
        Criterion {
            id: "nakamoto-coefficient".into(),
            category: Category::Chain,
            direction: Direction::HigherIsBetter,
            normalization: Normalization::Saturating { target: 10.0 },
        },
        Criterion {
            id: "top10-concentration".into(),
            category: Category::Chain,
            direction: Direction::LowerIsBetter,
            normalization: Normalization::Linear {
                floor: 0.0,
                ceiling: 100.0,
            },
        },
        Criterion {
            id: "node-hosting".into(),
            category: Category::Chain,
            direction: Direction::LowerIsBetter,
            normalization: Normalization::Linear {
                floor: 0.0,
                ceiling: 100.0,
            },
        },
        Criterion {
            id: "client-diversity".into(),
            category: Category::Chain,
            direction: Direction::LowerIsBetter,
            normalization: Normalization::Linear {
                floor: 0.0,
                ceiling: 100.0,
            },
        },
        // Control: who can unilaterally change or halt the system.
        Criterion {
            id: "admin-halt-capability".into(),
            category: Category::Control,
            direction: Direction::HigherIsBetter,
            normalization: Normalization::Assessment,
        },
        Criterion {
            id: "upgrade-control".into(),
            category: Category::Control,
            direction: Direction::HigherIsBetter,
            normalization: Normalization::Assessment,
        },
        Criterion {
            id: "validator-permissionlessness".into(),
            category: Category::Control,
            direction: Direction::HigherIsBetter,
            normalization: Normalization::Assessment,
        },
        // Fairness: distribution of stake and voice.
        Criterion {
            id: "token-distribution".into(),
            category: Category::Fairness,
            direction: Direction::LowerIsBetter,
            normalization: Normalization::Linear {
                floor: 0.0,
                ceiling: 100.0,
            },
        },
        Criterion {
            id: "voter-concentration".into(),
            category: Category::Fairness,
            direction: Direction::LowerIsBetter,
            normalization: Normalization::Linear {
                floor: 0.0,
                ceiling: 100.0,
            },
        },
        Criterion {
            id: "governance-participation".into(),
            category: Category::Fairness,
            direction: Direction::HigherIsBetter,
            normalization: Normalization::Linear {
                floor: 0.0,
                ceiling: 100.0,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: &str) -> Criterion {
        catalog().into_iter().find(|c| c.id.as_str() == id).unwrap()
    }

    #[test]
    fn saturating_caps_at_ten() {
        let c = criterion("nakamoto-coefficient");
        assert_eq!(c.normalize(5.0), 5.0);
        assert_eq!(c.normalize(10.0), 10.0);
        assert_eq!(c.normalize(40.0), 10.0);
    }

    #[test]
    fn lower_is_better_inverts() {
        let c = criterion("top10-concentration");
        // 100% concentration scores 0, 0% scores 10.
        assert_eq!(c.normalize(100.0), 0.0);
        assert_eq!(c.normalize(0.0), 10.0);
        assert!((c.normalize(33.3) - 6.67).abs() < 0.01);
    }

    #[test]
    fn out_of_domain_raw_is_clamped() {
        let c = criterion("top10-concentration");
        assert_eq!(c.normalize(150.0), 0.0);
        assert_eq!(c.normalize(-20.0), 10.0);

        let a = criterion("admin-halt-capability");
        assert_eq!(a.normalize(12.0), 10.0);
        assert_eq!(a.normalize(-3.0), 0.0);
    }

    #[test]
    fn every_criterion_has_exactly_one_category() {
        let all = catalog();
        let mut ids = std::collections::HashSet::new();
        for c in &all {
            assert!(ids.insert(c.id.clone()), "duplicate criterion {}", c.id);
        }
        // All three categories are populated.
        for cat in Category::all() {
            assert!(all.iter().any(|c| c.category == cat), "{cat} empty");
        }
    }
}
