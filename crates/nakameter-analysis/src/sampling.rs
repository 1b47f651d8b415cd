//! Population-sampling estimator.
//!
//! Used when a metric needs one remote call per population member and the
//! population (tens of thousands of peer nodes) vastly exceeds any sane
//! request budget. The caller fetches the cheap bulk identifier list; the
//! sampler draws a bounded random sample and probes each member through the
//! caller-supplied classify function, tolerating individual failures.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use nakameter_types::SampleEstimate;

/// Default ceiling on sample-derived confidence.
///
/// Strictly below 1.0 so a sampled measurement never masquerades as an
/// exhaustive one, even at 100% probe success.
pub const DEFAULT_CONFIDENCE_CAP: f64 = 0.75;

/// Bounded random-sampling estimator.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    sample_size: usize,
    confidence_cap: f64,
}

impl Sampler {
    /// Estimator drawing at most `sample_size` members.
    pub fn new(sample_size: usize) -> Self {
        Self {
            sample_size,
            confidence_cap: DEFAULT_CONFIDENCE_CAP,
        }
    }

    /// Override the confidence ceiling. Must stay in `(0, 1)` - a cap of
    /// 1.0 would erase the sampled-vs-exhaustive distinction.
    #[must_use]
    pub fn with_confidence_cap(mut self, cap: f64) -> Self {
        assert!(cap > 0.0 && cap < 1.0, "confidence cap must be in (0, 1)");
        self.confidence_cap = cap;
        self
    }

    /// Shuffle the population and keep the first
    /// `min(sample_size, population)` members.
    pub fn sample<T, R: Rng>(&self, mut population: Vec<T>, rng: &mut R) -> Vec<T> {
        population.shuffle(rng);
        population.truncate(self.sample_size.min(population.len()));
        population
    }

    /// Probe a random sample of `population` and bucket the classifications.
    ///
    /// `probe` resolves one member to a class, or `None` on failure; probes
    /// run sequentially because each one is rate-limited I/O on the caller's
    /// side. Returns `None` for an empty population or when *no* probe
    /// succeeded - never a point estimate at zero confidence that could be
    /// mistaken for "0% prevalence".
    pub async fn estimate<T, K, R, F, Fut>(
        &self,
        population: Vec<T>,
        rng: &mut R,
        probe: F,
    ) -> Option<SampleOutcome<K>>
    where
        K: Eq + Hash,
        R: Rng,
        F: Fn(T) -> Fut,
        Fut: Future<Output = Option<K>>,
    {
        let population_size = population.len();
        let sampled = self.sample(population, rng);
        let sample_len = sampled.len();
        if sample_len == 0 {
            return None;
        }

        let mut counts: HashMap<K, usize> = HashMap::new();
        let mut successes = 0usize;
        for member in sampled {
            if let Some(class) = probe(member).await {
                successes += 1;
                *counts.entry(class).or_insert(0) += 1;
            }
        }

        debug!(
            population = population_size,
            sampled = sample_len,
            successes,
            "sampling pass complete"
        );

        if successes == 0 {
            return None;
        }

        let confidence = self
            .confidence_cap
            .min(successes as f64 / sample_len as f64);

        Some(SampleOutcome {
            counts,
            successes,
            sampled: sample_len,
            confidence,
        })
    }
}

/// Classified results of one sampling pass.
#[derive(Debug, Clone)]
pub struct SampleOutcome<K> {
    counts: HashMap<K, usize>,
    successes: usize,
    sampled: usize,
    confidence: f64,
}

impl<K: Eq + Hash> SampleOutcome<K> {
    /// Number of probes that resolved.
    pub fn successes(&self) -> usize {
        self.successes
    }

    /// Number of members actually probed.
    pub fn sampled(&self) -> usize {
        self.sampled
    }

    /// `min(cap, successes / sampled)`.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Raw count for one class.
    pub fn count_of(&self, class: &K) -> usize {
        self.counts.get(class).copied().unwrap_or(0)
    }

    /// Share of successful probes in `class`, in percent, 1 decimal place.
    pub fn share_of(&self, class: &K) -> f64 {
        round1(self.count_of(class) as f64 / self.successes as f64 * 100.0)
    }

    /// Fold one class's share into a confidence-carrying estimate.
    pub fn estimate_for(&self, class: &K) -> SampleEstimate {
        SampleEstimate {
            value: self.share_of(class),
            confidence: self.confidence,
        }
    }
}

impl<K: Eq + Hash + Ord> SampleOutcome<K> {
    /// The largest bucket and its share. Ties break toward the smaller key
    /// so equal outcomes report equal dominants.
    pub fn dominant(&self) -> Option<(&K, f64)> {
        self.counts
            .iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
            .map(|(k, _)| (k, self.share_of(k)))
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
