//! Nakameter Source Registry
//!
//! A declarative table answering one question: for this criterion and this
//! project, which provider do we ask first, and who are the fallbacks?
//!
//! # Design
//!
//! The registry is pure data - an immutable lookup table built once plus a
//! pure override-merge in [`SourceRegistry::resolve`]. It performs no I/O
//! and holds no mutable state. A separate execution engine walks the
//! resolved primary -> fallback chain at runtime until one source yields a
//! usable value.
//!
//! # Overrides
//!
//! A per-(project, criterion) override replaces only the *primary* source.
//! Fallbacks remain shared across projects, so one chain's bespoke explorer
//! endpoint never hides the common fallback path.

mod builtin;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use nakameter_types::{CriterionId, ProjectId, ProviderId};

/// One way to obtain one criterion's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Which provider serves it.
    pub provider: ProviderId,
    /// Endpoint template for the call.
    pub endpoint: String,
    /// Declarative key naming the extraction routine the execution engine
    /// applies to the response.
    pub extractor: String,
}

impl SourceConfig {
    /// Construct a source config.
    pub fn new(
        provider: impl Into<ProviderId>,
        endpoint: impl Into<String>,
        extractor: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            endpoint: endpoint.into(),
            extractor: extractor.into(),
        }
    }
}

/// How often a criterion's value is worth refreshing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    /// Fast-moving metrics (validator sets, hashrate shares).
    Hourly,
    /// Slow-moving metrics (node hosting, client diversity).
    Daily,
    /// Nearly static metrics (token distribution, assessments).
    Weekly,
}

/// Default mapping for one criterion: primary source, ordered fallbacks,
/// refresh cadence. Declared at build time, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMapping {
    /// The criterion this mapping serves.
    pub criterion: CriterionId,
    /// First source to try.
    pub primary: SourceConfig,
    /// Tried in order after the primary fails.
    pub fallbacks: Vec<SourceConfig>,
    /// Refresh cadence.
    pub update_frequency: UpdateFrequency,
    /// Whether the endpoint is templated per chain (vs. one shared feed).
    pub chain_specific: bool,
}

/// The effective source chain for one (criterion, project) pair.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSource<'a> {
    /// Primary after any per-project override.
    pub primary: &'a SourceConfig,
    /// Shared fallbacks, in order.
    pub fallbacks: &'a [SourceConfig],
    /// Refresh cadence.
    pub update_frequency: UpdateFrequency,
    /// Whether the endpoint is templated per chain.
    pub chain_specific: bool,
}

impl<'a> ResolvedSource<'a> {
    /// The full chain to walk: primary first, then fallbacks in order.
    pub fn sources(&self) -> impl Iterator<Item = &'a SourceConfig> + '_ {
        std::iter::once(self.primary).chain(self.fallbacks.iter())
    }
}

/// Immutable criterion -> source lookup table with per-project overrides.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    mappings: HashMap<CriterionId, SourceMapping>,
    overrides: HashMap<(ProjectId, CriterionId), SourceConfig>,
}

impl SourceRegistry {
    /// Empty registry (for tests and non-builtin tables).
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shipped with Nakameter. See [`builtin`](self::builtin).
    pub fn builtin() -> Self {
        builtin::build()
    }

    /// Add a criterion mapping.
    #[must_use]
    pub fn register(mut self, mapping: SourceMapping) -> Self {
        self.mappings.insert(mapping.criterion.clone(), mapping);
        self
    }

    /// Replace the primary source for one (project, criterion) pair.
    /// Fallbacks are not touched.
    #[must_use]
    pub fn override_primary(
        mut self,
        project: impl Into<ProjectId>,
        criterion: impl Into<CriterionId>,
        config: SourceConfig,
    ) -> Self {
        self.overrides
            .insert((project.into(), criterion.into()), config);
        self
    }

    /// The default mapping for a criterion, ignoring overrides.
    pub fn mapping(&self, criterion: &CriterionId) -> Option<&SourceMapping> {
        self.mappings.get(criterion)
    }

    /// Resolve the effective source chain for `(criterion, project)`.
    ///
    /// Pure lookup: the default mapping with any per-project primary
    /// override applied. `None` when the criterion is unknown.
    pub fn resolve(&self, criterion: &CriterionId, project: &ProjectId) -> Option<ResolvedSource<'_>> {
        let mapping = self.mappings.get(criterion)?;
        let primary = self
            .overrides
            .get(&(project.clone(), criterion.clone()))
            .unwrap_or(&mapping.primary);

        Some(ResolvedSource {
            primary,
            fallbacks: &mapping.fallbacks,
            update_frequency: mapping.update_frequency,
            chain_specific: mapping.chain_specific,
        })
    }

    /// All registered criteria.
    pub fn criteria(&self) -> impl Iterator<Item = &CriterionId> {
        self.mappings.keys()
    }

    /// Number of registered criteria.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
