//! The uniform surface every adapter's metrics record presents.

use nakameter_types::{CriterionId, FetchStatus};

/// A typed bundle of independently-resolving metric fields.
///
/// Each adapter family has its own record struct; this trait is the shared
/// contract the collector builds on: which fields count as *core*, how many
/// of them resolved, and how the record feeds the scoring engine.
pub trait MetricsRecord {
    /// Names of the fields that decide fetch-status classification.
    /// Nice-to-have fields (confidence annotations, raw counts) stay out.
    const CORE_METRICS: &'static [&'static str];

    /// The record with every field unresolved.
    fn null() -> Self;

    /// How many core metrics resolved non-null.
    fn core_resolved(&self) -> usize;

    /// Success / partial / failed, from core-metric presence.
    fn fetch_status(&self) -> FetchStatus {
        FetchStatus::classify(self.core_resolved(), Self::CORE_METRICS.len())
    }

    /// The record as scoring-engine input: criterion ids mapped to
    /// value-or-null. Null stays null - the scoring engine excludes it.
    fn criterion_values(&self) -> Vec<(CriterionId, Option<f64>)>;
}

/// Count how many of a record's core `Option` fields are `Some`.
///
/// Small helper so record impls stay declarative:
/// `resolved_count(&[self.a.is_some(), self.b.is_some()])`.
pub(crate) fn resolved_count(fields: &[bool]) -> usize {
    fields.iter().filter(|present| **present).count()
}
