//! Weight-table analysis.
//!
//! Given a weight table and the live question count, estimate how often each
//! Ocean × Season outcome occurs when every question is answered uniformly at
//! random, and which of the 20 combinations can occur at all.
//!
//! [`MonteCarloAnalyzer`] samples; [`ExactAnalyzer`] enumerates. [`analyze`]
//! dispatches on [`AnalyzerConfig::method`].

pub mod config;
pub mod exact;
pub mod model;
pub mod monte_carlo;
pub mod report;

use log::warn;

pub use config::{AnalysisMethod, AnalyzerConfig, ClassificationModel, CompositeBins};
pub use exact::{ExactAnalyzer, enumerate_totals};
pub use model::{composite_classify, production_classify};
pub use monte_carlo::{MonteCarloAnalyzer, estimate_distribution};
pub use report::{DistributionReport, Reachability};

use crate::error::{Result, TidecastError};
use crate::weights::WeightTable;

/// Analyze a weight table with the configured method.
///
/// With [`AnalysisMethod::Auto`], exact enumeration is attempted first and
/// the run falls back to Monte Carlo sampling if the state space is too
/// large.
pub fn analyze(
    weights: &WeightTable,
    question_count: u32,
    config: &AnalyzerConfig,
) -> Result<DistributionReport> {
    match config.method {
        AnalysisMethod::MonteCarlo => MonteCarloAnalyzer::new(config.clone()).run(weights, question_count),
        AnalysisMethod::Exact => ExactAnalyzer::new(config.clone()).run(weights, question_count),
        AnalysisMethod::Auto => match ExactAnalyzer::new(config.clone()).run(weights, question_count) {
            Err(TidecastError::Analysis(reason)) => {
                warn!("Falling back to Monte Carlo sampling: {reason}");
                MonteCarloAnalyzer::new(config.clone()).run(weights, question_count)
            }
            other => other,
        },
    }
}
