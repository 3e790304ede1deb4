//! # Tidecast
//!
//! Trait scoring and classification for personality quizzes.
//!
//! ## Features
//!
//! - Deterministic classifier turning quiz answers into an Ocean × Season result
//! - Weight tables loadable from JSON, JSON Lines and CSV, with structural checks
//! - Monte Carlo estimation of the outcome distribution, sequential or parallel
//! - Exact enumeration of reachable outcomes for small tables
//! - Command line interface for classification, analysis and validation

pub mod analysis;
pub mod answer;
pub mod classify;
pub mod cli;
pub mod error;
pub mod weights;

pub mod prelude {
    pub use crate::analysis::{
        AnalysisMethod, AnalyzerConfig, ClassificationModel, DistributionReport, analyze,
        estimate_distribution,
    };
    pub use crate::answer::{Answer, AnswerSet};
    pub use crate::classify::{ClassificationResult, Ocean, Season, classify, normalize};
    pub use crate::error::{Result, TidecastError};
    pub use crate::weights::{ChoiceWeightEntry, TraitVector, WeightTable};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
