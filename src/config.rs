use std::path::Path;

use crate::error::ConfigError;

/// Emission covariance structure requested from the fitting primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovarianceKind {
    /// Diagonal covariance, one variance per feature per state.
    Diag,
}

/// Settings handed to the external fitting primitive for every candidate.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FitConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_covariance")]
    pub covariance: CovarianceKind,
}

impl FitConfig {
    pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
    pub const DEFAULT_SEED: u64 = 14;
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            seed: Self::DEFAULT_SEED,
            covariance: CovarianceKind::Diag,
        }
    }
}

fn default_max_iterations() -> usize {
    FitConfig::DEFAULT_MAX_ITERATIONS
}
fn default_seed() -> u64 {
    FitConfig::DEFAULT_SEED
}
fn default_covariance() -> CovarianceKind {
    CovarianceKind::Diag
}

/// Closed interval of candidate hidden-state counts.
///
/// An inverted interval (min > max) is not an error; it yields no candidates
/// and selection degrades to the fallback state count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct CandidateRange {
    pub min_states: usize,
    pub max_states: usize,
}

impl CandidateRange {
    pub fn new(min_states: usize, max_states: usize) -> Self {
        Self {
            min_states,
            max_states,
        }
    }

    /// Candidate counts in ascending order.
    pub fn states(&self) -> std::ops::RangeInclusive<usize> {
        self.min_states..=self.max_states
    }

    pub fn contains(&self, num_states: usize) -> bool {
        num_states >= self.min_states && num_states <= self.max_states
    }
}

impl Default for CandidateRange {
    fn default() -> Self {
        Self {
            min_states: 2,
            max_states: 10,
        }
    }
}

/// Training-side configuration bundle, loadable from JSON.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TrainingConfig {
    #[serde(default)]
    pub range: CandidateRange,
    #[serde(default = "default_fallback_states")]
    pub fallback_states: usize,
    #[serde(default)]
    pub fit: FitConfig,
}

fn default_fallback_states() -> usize {
    TrainingConfig::DEFAULT_FALLBACK_STATES
}

impl TrainingConfig {
    pub const DEFAULT_FALLBACK_STATES: usize = 3;

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io("read training config", e))?;
        serde_json::from_str(&data).map_err(|e| ConfigError::json("parse training config", e))
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            range: CandidateRange::default(),
            fallback_states: Self::DEFAULT_FALLBACK_STATES,
            fit: FitConfig::default(),
        }
    }
}
