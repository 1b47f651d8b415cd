//! Scoring categories and the final per-project score record.

/// The three scoring categories every criterion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Base-layer properties: validator/miner concentration, node hosting,
    /// client diversity.
    Chain,
    /// Who can unilaterally change or halt the system: admin keys, upgrade
    /// powers, halt capability.
    Control,
    /// Distribution fairness: token allocation, governance participation.
    Fairness,
}

impl Category {
    /// All categories, in scoring order.
    pub const fn all() -> [Category; 3] {
        [Category::Chain, Category::Control, Category::Fairness]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Chain => write!(f, "chain"),
            Category::Control => write!(f, "control"),
            Category::Fairness => write!(f, "fairness"),
        }
    }
}

/// Whether a larger raw value means more or less decentralization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Larger raw value is better (e.g. Nakamoto coefficient).
    HigherIsBetter,
    /// Larger raw value is worse (e.g. top-10 concentration %).
    LowerIsBetter,
}

/// The scored output for one project and one scoring run.
///
/// Invariant: `total_score = 0.4*chain + 0.4*control + 0.2*fairness`
/// unless the kill switch is active, in which case `total_score` is capped
/// while `uncapped_score` preserves the true weighted value so capped
/// projects still rank against each other.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectScore {
    /// Chain category average, 0-10.
    pub chain_score: f64,
    /// Control category average, 0-10.
    pub control_score: f64,
    /// Fairness category average, 0-10.
    pub fairness_score: f64,
    /// Weighted total, possibly capped.
    pub total_score: f64,
    /// Weighted total before any cap.
    pub uncapped_score: f64,
    /// A confirmed unilateral freeze/pause/halt power was detected.
    pub kill_switch_active: bool,
}
