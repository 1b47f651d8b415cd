//! Category averaging, weighting, and the kill-switch cap.

use std::collections::HashMap;

use tracing::{debug, warn};

use nakameter_types::{Category, CriterionId, ProjectScore};

use crate::criteria::{catalog, Criterion};

/// Chain category weight in the total score.
pub const CHAIN_WEIGHT: f64 = 0.4;
/// Control category weight in the total score.
pub const CONTROL_WEIGHT: f64 = 0.4;
/// Fairness category weight in the total score.
pub const FAIRNESS_WEIGHT: f64 = 0.2;

/// The criterion whose value encodes unilateral halt capability.
pub const KILL_SWITCH_CRITERION: &str = "admin-halt-capability";

/// Raw assessment at or below this means a confirmed unilateral
/// freeze/pause/halt power.
pub const KILL_SWITCH_CUTOFF: f64 = 2.0;

/// Ceiling the total score is clamped to while the kill switch is active.
pub const KILL_SWITCH_CEILING: f64 = 1.0;

/// Normalizes per-criterion values and aggregates them into a
/// [`ProjectScore`]. No I/O, no mutable state.
#[derive(Debug)]
pub struct ScoringEngine {
    criteria: HashMap<CriterionId, Criterion>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    /// Engine over the shipped criteria catalog.
    pub fn new() -> Self {
        Self::with_criteria(catalog())
    }

    /// Engine over an explicit catalog (tests, experiments).
    pub fn with_criteria(criteria: Vec<Criterion>) -> Self {
        Self {
            criteria: criteria.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    /// Fold criterion values into the final score record.
    ///
    /// `None` values are excluded from their category's average - a
    /// category `{8, null}` scores as 8, not 4. Criteria absent from the
    /// input map simply do not participate; input ids with no catalog
    /// entry are logged and skipped.
    pub fn calculate_project_scores(
        &self,
        values: &HashMap<CriterionId, Option<f64>>,
    ) -> ProjectScore {
        let mut sums: HashMap<Category, (f64, usize)> = HashMap::new();

        for (id, value) in values {
            let Some(criterion) = self.criteria.get(id) else {
                warn!(criterion = %id, "value for unknown criterion, skipping");
                continue;
            };
            // Null stays excluded: no entry, no count.
            let Some(raw) = value else {
                debug!(criterion = %id, "null value excluded from category average");
                continue;
            };

            let sub_score = criterion.normalize(*raw);
            let entry = sums.entry(criterion.category).or_insert((0.0, 0));
            entry.0 += sub_score;
            entry.1 += 1;
        }

        let category_score = |category: Category| -> f64 {
            match sums.get(&category) {
                Some((sum, count)) if *count > 0 => sum / *count as f64,
                _ => {
                    warn!(%category, "no resolvable criteria in category, scoring 0");
                    0.0
                }
            }
        };

        let chain_score = category_score(Category::Chain);
        let control_score = category_score(Category::Control);
        let fairness_score = category_score(Category::Fairness);

        let uncapped_score = CHAIN_WEIGHT * chain_score
            + CONTROL_WEIGHT * control_score
            + FAIRNESS_WEIGHT * fairness_score;

        let kill_switch_active = values
            .get(&CriterionId::from_static(KILL_SWITCH_CRITERION))
            .and_then(|v| *v)
            .is_some_and(|raw| raw <= KILL_SWITCH_CUTOFF);

        let total_score = if kill_switch_active {
            uncapped_score.min(KILL_SWITCH_CEILING)
        } else {
            uncapped_score
        };

        ProjectScore {
            chain_score,
            control_score,
            fairness_score,
            total_score,
            uncapped_score,
            kill_switch_active,
        }
    }
}
