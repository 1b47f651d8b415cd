//! Per-project snapshot assembly.
//!
//! The document external collaborators persist after a collection run:
//! timestamp, source, total score, fetch-status classification, and the
//! adapter's metrics record. Persistence itself (and rendering) stays
//! outside this crate - this is the in-memory shape only.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use nakameter_types::FetchStatus;

use crate::record::MetricsRecord;

/// The collaborator-facing per-project document.
///
/// Serializes to the external JSON shape:
/// `{lastUpdated, source, totalScore, fetchStatus, metrics}` with an
/// ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// When this snapshot was assembled.
    pub last_updated: DateTime<Utc>,
    /// Which provider (or provider chain) produced the metrics.
    pub source: String,
    /// The project's weighted total score.
    pub total_score: f64,
    /// Success / partial / failed, from core-metric presence.
    pub fetch_status: FetchStatus,
    /// The adapter's metrics record, as emitted.
    pub metrics: Value,
}

impl ProjectSnapshot {
    /// Assemble a snapshot stamped with the current time.
    pub fn assemble<M>(source: impl Into<String>, metrics: &M, total_score: f64) -> Self
    where
        M: MetricsRecord + Serialize,
    {
        Self::assemble_at(source, metrics, total_score, Utc::now())
    }

    /// Assemble a snapshot with an explicit timestamp (deterministic tests,
    /// backfills).
    pub fn assemble_at<M>(
        source: impl Into<String>,
        metrics: &M,
        total_score: f64,
        at: DateTime<Utc>,
    ) -> Self
    where
        M: MetricsRecord + Serialize,
    {
        let fetch_status = metrics.fetch_status();
        let metrics = serde_json::to_value(metrics).unwrap_or_else(|e| {
            warn!(error = %e, "metrics record did not serialize, persisting null");
            Value::Null
        });

        Self {
            last_updated: at,
            source: source.into(),
            total_score,
            fetch_status,
            metrics,
        }
    }
}
