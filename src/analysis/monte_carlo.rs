//! Monte Carlo estimation of the outcome distribution.
//!
//! Each trial simulates one quiz completion: for every live question with at
//! least one weight entry, one entry is picked uniformly at random and its
//! weights are added to the trial's totals. Questions without entries are
//! skipped. The totals are then classified with the configured model.
//!
//! Trials are grouped into fixed-size chunks. Chunk seeds are drawn in order
//! from a base `StdRng` seeded with the run seed, and each chunk samples from
//! its own `StdRng`, so a seeded run gives the same report whether chunks run
//! sequentially or on a thread pool.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::analysis::config::{AnalysisMethod, AnalyzerConfig, ClassificationModel, CompositeBins};
use crate::analysis::report::{DistributionReport, RunInfo, Tally};
use crate::error::{Result, TidecastError};
use crate::weights::{TraitVector, WeightTable, ensure_question_count};

/// Sampling-based analyzer.
///
/// # Examples
///
/// ```
/// use tidecast::analysis::{AnalyzerConfig, MonteCarloAnalyzer};
/// use tidecast::weights::{ChoiceWeightEntry, TraitVector, WeightTable};
///
/// let weights = WeightTable::new(vec![
///     ChoiceWeightEntry::new(1, "A", TraitVector::new(3, 0, 0)),
///     ChoiceWeightEntry::new(1, "B", TraitVector::new(-3, 0, 0)),
/// ]);
/// let analyzer = MonteCarloAnalyzer::new(AnalyzerConfig::default().with_seed(7));
/// let report = analyzer.run(&weights, 1).unwrap();
/// assert_eq!(report.trials, 10_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MonteCarloAnalyzer {
    config: AnalyzerConfig,
}

/// A chunk of trials and the seed of its RNG stream.
#[derive(Debug, Clone, Copy)]
struct Chunk {
    trials: usize,
    seed: u64,
}

impl MonteCarloAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Estimate the outcome distribution for questions `1..=question_count`.
    pub fn run(&self, weights: &WeightTable, question_count: u32) -> Result<DistributionReport> {
        self.config.validate()?;
        ensure_question_count(question_count)?;

        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let slots = weights.weights_per_question(question_count);
        let chunks = plan_chunks(self.config.trials, self.config.chunk_size, seed);

        debug!(
            "Monte Carlo analysis: {} trials over {} questions in {} chunks (seed {}, model {:?}, parallel {})",
            self.config.trials,
            question_count,
            chunks.len(),
            seed,
            self.config.model,
            self.config.parallel
        );

        let tally = if self.config.parallel {
            self.run_parallel(&slots, &chunks)?
        } else {
            run_sequential(&slots, &chunks, self.config.model, &self.config.bins)
        };

        Ok(finish(
            &tally,
            &slots,
            question_count,
            self.config.trials,
            seed,
            self.config.model,
        ))
    }

    fn run_parallel(&self, slots: &[Vec<TraitVector>], chunks: &[Chunk]) -> Result<Tally> {
        let thread_pool_size = self.config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("monte-carlo-{i}"))
            .build()
            .map_err(|e| TidecastError::thread_pool(format!("Failed to create thread pool: {e}")))?;

        let model = self.config.model;
        let bins = &self.config.bins;
        Ok(pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| run_chunk(slots, *chunk, model, bins))
                .reduce(Tally::new, Tally::merge)
        }))
    }
}

/// Estimate the outcome distribution with the default configuration:
/// sequential trials, composite formula, a fresh random seed.
///
/// Never fails; questions without entries simply contribute nothing and are
/// listed in [`DistributionReport::empty_questions`]. `question_count` is
/// clamped to [`MAX_QUESTION_COUNT`](crate::weights::MAX_QUESTION_COUNT).
pub fn estimate_distribution(
    weights: &WeightTable,
    question_count: u32,
    trials: usize,
) -> DistributionReport {
    let config = AnalyzerConfig::default().with_trials(trials);
    let seed: u64 = rand::rng().random();
    let slots = weights.weights_per_question(question_count);
    let chunks = plan_chunks(trials, config.chunk_size, seed);
    let tally = run_sequential(&slots, &chunks, config.model, &config.bins);
    finish(&tally, &slots, question_count, trials, seed, config.model)
}

fn plan_chunks(trials: usize, chunk_size: usize, seed: u64) -> Vec<Chunk> {
    let mut base = StdRng::seed_from_u64(seed);
    let mut chunks = Vec::with_capacity(trials.div_ceil(chunk_size));
    let mut remaining = trials;
    while remaining > 0 {
        let size = remaining.min(chunk_size);
        chunks.push(Chunk {
            trials: size,
            seed: base.random(),
        });
        remaining -= size;
    }
    chunks
}

fn run_sequential(
    slots: &[Vec<TraitVector>],
    chunks: &[Chunk],
    model: ClassificationModel,
    bins: &CompositeBins,
) -> Tally {
    chunks
        .iter()
        .map(|chunk| run_chunk(slots, *chunk, model, bins))
        .fold(Tally::new(), Tally::merge)
}

fn run_chunk(
    slots: &[Vec<TraitVector>],
    chunk: Chunk,
    model: ClassificationModel,
    bins: &CompositeBins,
) -> Tally {
    let mut rng = StdRng::seed_from_u64(chunk.seed);
    let mut tally = Tally::new();

    for _ in 0..chunk.trials {
        let mut totals = TraitVector::ZERO;
        for choices in slots.iter().filter(|choices| !choices.is_empty()) {
            totals += choices[rng.random_range(0..choices.len())];
        }
        let (ocean, season) = model.outcome(&totals, bins);
        tally.record(ocean, season, 1.0);
    }

    tally
}

fn finish(
    tally: &Tally,
    slots: &[Vec<TraitVector>],
    question_count: u32,
    trials: usize,
    seed: u64,
    model: ClassificationModel,
) -> DistributionReport {
    let empty_questions = empty_questions(slots);
    if !empty_questions.is_empty() {
        warn!(
            "Questions without weight entries contribute nothing to any trial: {empty_questions:?}"
        );
    }

    let report = DistributionReport::from_tally(
        tally,
        RunInfo {
            method: AnalysisMethod::MonteCarlo,
            model,
            trials,
            seed: Some(seed),
            states_enumerated: None,
            question_count,
            empty_questions,
        },
    );

    info!(
        "Monte Carlo analysis reached {}/{} combinations ({} oceans, {} seasons)",
        report.reachability.reachable_combinations,
        report.reachability.total_combinations,
        report.reachability.oceans_covered,
        report.reachability.seasons_covered
    );
    report
}

/// Question ids (1-based) whose slot has no entries.
pub(crate) fn empty_questions(slots: &[Vec<TraitVector>]) -> Vec<u32> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, choices)| choices.is_empty())
        .map(|(index, _)| index as u32 + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::labels::{Ocean, Season};
    use crate::weights::ChoiceWeightEntry;

    fn coin_table() -> WeightTable {
        WeightTable::new(vec![
            ChoiceWeightEntry::new(1, "A", TraitVector::new(20, 0, 0)),
            ChoiceWeightEntry::new(1, "B", TraitVector::new(-20, 0, 0)),
        ])
    }

    #[test]
    fn test_plan_chunks() {
        let chunks = plan_chunks(2_500, 1_000, 10);
        let sizes: Vec<usize> = chunks.iter().map(|c| c.trials).collect();
        assert_eq!(sizes, vec![1_000, 1_000, 500]);
        assert!(plan_chunks(0, 1_000, 1).is_empty());

        let again: Vec<u64> = plan_chunks(2_500, 1_000, 10).iter().map(|c| c.seed).collect();
        let seeds: Vec<u64> = chunks.iter().map(|c| c.seed).collect();
        assert_eq!(seeds, again);
    }

    #[test]
    fn test_adjacent_seeds_share_no_streams() {
        let first: Vec<u64> = plan_chunks(20_000, 1_000, 41).iter().map(|c| c.seed).collect();
        let second: Vec<u64> = plan_chunks(20_000, 1_000, 42).iter().map(|c| c.seed).collect();
        assert!(first.iter().all(|seed| !second.contains(seed)));
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let config = AnalyzerConfig::default().with_trials(3_000).with_seed(99);
        let a = MonteCarloAnalyzer::new(config.clone()).run(&coin_table(), 1).unwrap();
        let b = MonteCarloAnalyzer::new(config).run(&coin_table(), 1).unwrap();
        assert_eq!(a.ocean_distribution, b.ocean_distribution);
        assert_eq!(a.combination_distribution, b.combination_distribution);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = AnalyzerConfig::default()
            .with_trials(5_500)
            .with_seed(3)
            .with_chunk_size(500);
        let sequential = MonteCarloAnalyzer::new(config.clone())
            .run(&coin_table(), 1)
            .unwrap();
        let parallel = MonteCarloAnalyzer::new(config.with_parallel(true).with_thread_pool_size(3))
            .run(&coin_table(), 1)
            .unwrap();
        assert_eq!(sequential.combination_distribution, parallel.combination_distribution);
        assert_eq!(sequential.reachability, parallel.reachability);
    }

    #[test]
    fn test_coin_table_splits_evenly() {
        // Composite season score is 3*E = +/-60, ocean score E = +/-20.
        let report = MonteCarloAnalyzer::new(AnalyzerConfig::default().with_trials(20_000).with_seed(5))
            .run(&coin_table(), 1)
            .unwrap();
        assert_eq!(report.reachability.reachable_combinations, 2);
        assert!(report.is_reachable(Ocean::Arctic, Season::Winter));
        assert!(report.is_reachable(Ocean::Pacific, Season::Summer));
        assert!((report.ocean_percentage(Ocean::Pacific) - 50.0).abs() < 2.0);
    }

    #[test]
    fn test_zero_trials() {
        let report = estimate_distribution(&coin_table(), 1, 0);
        assert_eq!(report.trials, 0);
        assert_eq!(report.reachability.reachable_combinations, 0);
        assert!(report.ocean_distribution.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_empty_questions_reported() {
        let report = estimate_distribution(&coin_table(), 3, 100);
        assert_eq!(report.empty_questions, vec![2, 3]);
    }

    #[test]
    fn test_empty_table_is_neutral() {
        let report = estimate_distribution(&WeightTable::default(), 18, 500);
        assert_eq!(report.combination_percentage(Ocean::Indian, Season::Spring), 100.0);
        assert_eq!(report.reachability.reachable_combinations, 1);
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let weights = WeightTable::new(vec![
            ChoiceWeightEntry::new(1, "A", TraitVector::new(0, 0, 800_000_000)),
            ChoiceWeightEntry::new(2, "A", TraitVector::new(i32::MAX, i32::MAX, 0)),
            ChoiceWeightEntry::new(3, "A", TraitVector::new(i32::MAX, i32::MAX, 0)),
        ]);
        let report = MonteCarloAnalyzer::new(AnalyzerConfig::default().with_trials(200).with_seed(1))
            .run(&weights, 3)
            .unwrap();
        assert_eq!(report.combination_percentage(Ocean::Pacific, Season::Summer), 100.0);

        let report = estimate_distribution(&weights, 3, 50);
        assert_eq!(report.reachability.reachable_combinations, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let analyzer = MonteCarloAnalyzer::new(AnalyzerConfig::default().with_chunk_size(0));
        assert!(matches!(
            analyzer.run(&coin_table(), 1),
            Err(TidecastError::Config(_))
        ));
    }
}
