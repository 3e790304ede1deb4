//! Command line argument parsing for Tidecast CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::config::{AnalysisMethod, ClassificationModel};
use crate::weights::MAX_QUESTION_COUNT;

/// Tidecast - quiz trait scoring and weight-table analysis
#[derive(Parser, Debug, Clone)]
#[command(name = "tidecast")]
#[command(about = "Classify quiz answers and analyze scoring weight tables")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TidecastArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TidecastArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify one answer set
    Classify(ClassifyArgs),

    /// Estimate the outcome distribution of a weight table
    Analyze(AnalyzeArgs),

    /// Check a weight table for structural problems
    Validate(ValidateArgs),
}

/// Arguments for classifying an answer set
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Weight table file (JSON, JSONL or CSV)
    #[arg(short, long, value_name = "WEIGHTS_FILE")]
    pub weights: PathBuf,

    /// Answer set file (JSON)
    #[arg(short, long, value_name = "ANSWERS_FILE")]
    pub answers: PathBuf,

    /// Refuse answer sets with unknown choices, duplicates or gaps
    #[arg(long)]
    pub strict: bool,

    /// Live question count, used by --strict to detect unanswered questions
    #[arg(long, value_parser = clap::value_parser!(u32).range(..=MAX_QUESTION_COUNT as i64))]
    pub questions: Option<u32>,
}

/// Arguments for analyzing a weight table
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Weight table file (JSON, JSONL or CSV)
    #[arg(short, long, value_name = "WEIGHTS_FILE")]
    pub weights: PathBuf,

    /// Number of live quiz questions
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(..=MAX_QUESTION_COUNT as i64))]
    pub questions: u32,

    /// Analyzer configuration file (JSON)
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// Number of Monte Carlo trials
    #[arg(short, long)]
    pub trials: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(long, env = "TIDECAST_SEED")]
    pub seed: Option<u64>,

    /// Run trials on a thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Number of threads to use (implies --parallel)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Analysis method
    #[arg(short = 'm', long)]
    pub method: Option<MethodArg>,

    /// Outcome formula
    #[arg(long)]
    pub model: Option<ModelArg>,
}

/// Analysis methods available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodArg {
    /// Random sampling
    MonteCarlo,
    /// Exhaustive enumeration
    Exact,
    /// Exact if small enough, sampling otherwise
    Auto,
}

impl From<MethodArg> for AnalysisMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::MonteCarlo => AnalysisMethod::MonteCarlo,
            MethodArg::Exact => AnalysisMethod::Exact,
            MethodArg::Auto => AnalysisMethod::Auto,
        }
    }
}

/// Outcome formulas available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelArg {
    /// Weighted composite scores (dashboard view)
    Composite,
    /// The production classifier
    Production,
}

impl From<ModelArg> for ClassificationModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Composite => ClassificationModel::Composite,
            ModelArg::Production => ClassificationModel::Production,
        }
    }
}

/// Arguments for weight table validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Weight table file (JSON, JSONL or CSV)
    #[arg(short, long, value_name = "WEIGHTS_FILE")]
    pub weights: PathBuf,

    /// Live question count, enables coverage checks
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(..=MAX_QUESTION_COUNT as i64))]
    pub questions: Option<u32>,

    /// Offered choices per question (JSON object: {"1": ["A", "B"], ...})
    #[arg(long, value_name = "CHOICES_FILE")]
    pub choices: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
