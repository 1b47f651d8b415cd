//! Measured values and fetch-cycle status.

use crate::ProviderId;

/// A raw measurement as produced by a source adapter.
///
/// `Null` is a first-class state meaning "unavailable". It is never coerced
/// to zero and must survive every downstream fold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetricValue {
    /// A numeric measurement.
    Number(f64),
    /// A textual measurement (e.g. a dominant client implementation name).
    Text(String),
    /// The measurement could not be obtained.
    Null,
}

impl MetricValue {
    /// Numeric view, `None` for text and null.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this measurement is unavailable.
    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(n: Option<f64>) -> Self {
        match n {
            Some(n) => MetricValue::Number(n),
            None => MetricValue::Null,
        }
    }
}

/// A measurement annotated with provenance and reliability.
///
/// Created fresh each fetch cycle and discarded once folded into a score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredValue {
    /// The measurement itself.
    pub value: MetricValue,
    /// When the measurement was taken (unix millis).
    pub timestamp_ms: u64,
    /// Which provider supplied it.
    pub provider: ProviderId,
    /// How completely the measurement was obtained.
    /// 1.0 = exhaustive enumeration; < 1.0 = sampled or degraded.
    pub confidence: f64,
}

impl MeasuredValue {
    /// An exhaustive (confidence 1.0) measurement.
    pub fn exhaustive(value: MetricValue, timestamp_ms: u64, provider: ProviderId) -> Self {
        Self {
            value,
            timestamp_ms,
            provider,
            confidence: 1.0,
        }
    }

    /// An unavailable measurement. Confidence is zero by definition.
    pub fn unavailable(timestamp_ms: u64, provider: ProviderId) -> Self {
        Self {
            value: MetricValue::Null,
            timestamp_ms,
            provider,
            confidence: 0.0,
        }
    }
}

/// Outcome classification of one project's fetch cycle.
///
/// Derived by counting how many of an adapter's core metrics resolved
/// non-null: all present, some present, none present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FetchStatus {
    /// Every core metric resolved.
    Success,
    /// Some core metrics resolved.
    Partial,
    /// No core metric resolved.
    Failed,
}

impl FetchStatus {
    /// Classify from counts of resolved vs. expected core metrics.
    pub fn classify(resolved: usize, expected: usize) -> Self {
        if expected == 0 || resolved >= expected {
            FetchStatus::Success
        } else if resolved > 0 {
            FetchStatus::Partial
        } else {
            FetchStatus::Failed
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStatus::Success => write!(f, "success"),
            FetchStatus::Partial => write!(f, "partial"),
            FetchStatus::Failed => write!(f, "failed"),
        }
    }
}
