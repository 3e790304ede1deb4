//! Configuration for weight-table analysis.
//!
//! # Examples
//!
//! ```
//! use tidecast::analysis::config::{AnalysisMethod, AnalyzerConfig, ClassificationModel};
//!
//! // Faithful defaults: 10 000 sequential Monte Carlo trials, composite formula.
//! let config = AnalyzerConfig::default();
//! assert_eq!(config.trials, 10_000);
//! assert_eq!(config.method, AnalysisMethod::MonteCarlo);
//!
//! // Reproducible parallel run scored with the production classifier.
//! let config = AnalyzerConfig::default()
//!     .with_trials(200_000)
//!     .with_seed(42)
//!     .with_parallel(true)
//!     .with_model(ClassificationModel::Production);
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TidecastError};

/// Default number of Monte Carlo trials per analysis.
pub const DEFAULT_TRIALS: usize = 10_000;

/// Which formula turns trial totals into an Ocean × Season outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationModel {
    /// Weighted composites: ocean `C*3 + P*2 + E`, season `E*3 + P*2 + C`,
    /// each cut into contiguous bins. This is what the admin dashboard has
    /// always reported.
    #[default]
    Composite,
    /// The production classifier: normalized Energy bucket for the ocean,
    /// raw Positivity + Curiosity sum for the season.
    Production,
}

/// How outcome probabilities are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    /// Uniform random sampling over a fixed number of trials.
    #[default]
    MonteCarlo,
    /// Exhaustive convolution of per-question choice distributions.
    Exact,
    /// Exact when the state space fits, Monte Carlo otherwise.
    Auto,
}

/// Bin bounds for the composite formula.
///
/// A score falls in bin `i` when it is below `bounds[i]` and not below any
/// earlier bound; scores at or above the last bound fall in the final bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeBins {
    /// Upper bounds (exclusive) of the first four ocean bins.
    pub ocean_bounds: [i32; 4],
    /// Upper bounds (exclusive) of the first three season bins.
    pub season_bounds: [i32; 3],
}

impl Default for CompositeBins {
    fn default() -> Self {
        Self {
            ocean_bounds: [-12, -4, 4, 12],
            season_bounds: [-6, 0, 6],
        }
    }
}

impl CompositeBins {
    /// Bin index of `score` among `bounds`.
    pub fn bin(score: i64, bounds: &[i32]) -> usize {
        bounds
            .iter()
            .position(|&bound| score < i64::from(bound))
            .unwrap_or(bounds.len())
    }

    pub fn validate(&self) -> Result<()> {
        let ascending = |bounds: &[i32]| bounds.windows(2).all(|w| w[0] < w[1]);
        if !ascending(&self.ocean_bounds) {
            return Err(TidecastError::config(
                "ocean bin bounds must be strictly ascending",
            ));
        }
        if !ascending(&self.season_bounds) {
            return Err(TidecastError::config(
                "season bin bounds must be strictly ascending",
            ));
        }
        Ok(())
    }
}

/// Configuration for the Monte Carlo and exact analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of simulated quiz completions.
    pub trials: usize,

    /// RNG seed. When `None`, a seed is drawn per run and recorded in the
    /// report.
    pub seed: Option<u64>,

    /// Run trial chunks on a rayon thread pool.
    pub parallel: bool,

    /// Trials per chunk. Each chunk has its own RNG stream derived from the
    /// seed, so results do not depend on thread count.
    pub chunk_size: usize,

    /// Thread pool size for parallel runs.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Formula used to classify trial totals.
    pub model: ClassificationModel,

    /// Sampling or exhaustive enumeration.
    pub method: AnalysisMethod,

    /// Composite formula bins.
    pub bins: CompositeBins,

    /// Largest number of distinct trait totals the exact analyzer will track.
    pub max_exact_states: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
            chunk_size: 1_000,
            thread_pool_size: None,
            model: ClassificationModel::Composite,
            method: AnalysisMethod::MonteCarlo,
            bins: CompositeBins::default(),
            max_exact_states: 2_000_000,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_thread_pool_size(mut self, threads: usize) -> Self {
        self.thread_pool_size = Some(threads);
        self
    }

    pub fn with_model(mut self, model: ClassificationModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_method(mut self, method: AnalysisMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_bins(mut self, bins: CompositeBins) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_max_exact_states(mut self, max_states: usize) -> Self {
        self.max_exact_states = max_states;
        self
    }

    /// Check the configuration for values no analyzer can run with.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(TidecastError::config("chunk_size must be greater than 0"));
        }
        if self.thread_pool_size == Some(0) {
            return Err(TidecastError::config(
                "thread_pool_size must be greater than 0",
            ));
        }
        if self.max_exact_states == 0 {
            return Err(TidecastError::config(
                "max_exact_states must be greater than 0",
            ));
        }
        self.bins.validate()
    }

    /// Read a configuration from a JSON file. Missing fields take their
    /// defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        let config: AnalyzerConfig = serde_json::from_str(&input)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_config_default() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.trials, 10_000);
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
        assert_eq!(config.chunk_size, 1_000);
        assert_eq!(config.model, ClassificationModel::Composite);
        assert_eq!(config.method, AnalysisMethod::MonteCarlo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        assert!(AnalyzerConfig::default().with_chunk_size(0).validate().is_err());
        assert!(
            AnalyzerConfig::default()
                .with_thread_pool_size(0)
                .validate()
                .is_err()
        );
        let bins = CompositeBins {
            ocean_bounds: [0, 0, 1, 2],
            season_bounds: [-1, 0, 1],
        };
        assert!(AnalyzerConfig::default().with_bins(bins).validate().is_err());
    }

    #[test]
    fn test_bin_edges() {
        let bounds = CompositeBins::default().ocean_bounds;
        assert_eq!(CompositeBins::bin(-13, &bounds), 0);
        assert_eq!(CompositeBins::bin(-12, &bounds), 1);
        assert_eq!(CompositeBins::bin(-5, &bounds), 1);
        assert_eq!(CompositeBins::bin(-4, &bounds), 2);
        assert_eq!(CompositeBins::bin(3, &bounds), 2);
        assert_eq!(CompositeBins::bin(4, &bounds), 3);
        assert_eq!(CompositeBins::bin(12, &bounds), 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"trials": 500, "model": "production"}"#).unwrap();
        assert_eq!(config.trials, 500);
        assert_eq!(config.model, ClassificationModel::Production);
        assert_eq!(config.chunk_size, 1_000);
        assert_eq!(config.bins, CompositeBins::default());
    }
}
