//! Exact outcome distribution by exhaustive enumeration.
//!
//! Every live question with entries picks one entry uniformly at random, so
//! the distribution of trait totals is the convolution of the per-question
//! uniform distributions. It is computed question by question over the set of
//! distinct totals reached so far; the state count is bounded by
//! [`AnalyzerConfig::max_exact_states`].

use ahash::AHashMap;
use log::{debug, info};

use crate::analysis::config::{AnalysisMethod, AnalyzerConfig};
use crate::analysis::monte_carlo::empty_questions;
use crate::analysis::report::{DistributionReport, RunInfo, Tally};
use crate::error::{Result, TidecastError};
use crate::weights::{TraitVector, WeightTable, ensure_question_count};

/// Probability of each reachable trait total.
pub type TotalsDistribution = AHashMap<TraitVector, f64>;

/// Enumerating analyzer.
#[derive(Debug, Clone, Default)]
pub struct ExactAnalyzer {
    config: AnalyzerConfig,
}

impl ExactAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Compute the exact outcome distribution for questions
    /// `1..=question_count`.
    ///
    /// Fails with [`TidecastError::Analysis`] when the number of distinct
    /// totals would exceed the configured limit.
    pub fn run(&self, weights: &WeightTable, question_count: u32) -> Result<DistributionReport> {
        self.config.validate()?;
        ensure_question_count(question_count)?;

        let slots = weights.weights_per_question(question_count);
        let distribution = enumerate_totals(&slots, self.config.max_exact_states)?;

        let mut tally = Tally::new();
        for (totals, probability) in &distribution {
            let (ocean, season) = self.config.model.outcome(totals, &self.config.bins);
            tally.record(ocean, season, *probability);
        }

        let report = DistributionReport::from_tally(
            &tally,
            RunInfo {
                method: AnalysisMethod::Exact,
                model: self.config.model,
                trials: 0,
                seed: None,
                states_enumerated: Some(distribution.len()),
                question_count,
                empty_questions: empty_questions(&slots),
            },
        );

        info!(
            "Exact analysis over {} states reached {}/{} combinations",
            distribution.len(),
            report.reachability.reachable_combinations,
            report.reachability.total_combinations
        );
        Ok(report)
    }
}

/// Convolve the per-question uniform choice distributions.
///
/// Empty slots are skipped. The result always contains at least the zero
/// vector when every slot is empty.
pub fn enumerate_totals(
    slots: &[Vec<TraitVector>],
    max_states: usize,
) -> Result<TotalsDistribution> {
    let mut current: TotalsDistribution = AHashMap::new();
    current.insert(TraitVector::ZERO, 1.0);

    for (index, choices) in slots.iter().enumerate() {
        if choices.is_empty() {
            continue;
        }
        let share = 1.0 / choices.len() as f64;
        let mut next: TotalsDistribution =
            AHashMap::with_capacity(current.len().saturating_mul(choices.len()).min(max_states));

        for (totals, probability) in &current {
            for weights in choices {
                *next.entry(*totals + *weights).or_insert(0.0) += probability * share;
            }
            if next.len() > max_states {
                return Err(TidecastError::analysis(format!(
                    "exact enumeration exceeded {max_states} states at question {}",
                    index + 1
                )));
            }
        }

        debug!("Question {}: {} distinct totals", index + 1, next.len());
        current = next;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::config::ClassificationModel;
    use crate::classify::labels::{Ocean, Season};
    use crate::weights::ChoiceWeightEntry;

    fn entry(q: u32, c: &str, e: i32, p: i32, cu: i32) -> ChoiceWeightEntry {
        ChoiceWeightEntry::new(q, c, TraitVector::new(e, p, cu))
    }

    #[test]
    fn test_enumerate_totals_convolution() {
        let slots = vec![
            vec![TraitVector::new(1, 0, 0), TraitVector::new(-1, 0, 0)],
            vec![],
            vec![TraitVector::new(1, 0, 0), TraitVector::new(-1, 0, 0)],
        ];
        let distribution = enumerate_totals(&slots, 100).unwrap();
        assert_eq!(distribution.len(), 3);
        assert_eq!(distribution[&TraitVector::new(0, 0, 0)], 0.5);
        assert_eq!(distribution[&TraitVector::new(2, 0, 0)], 0.25);
        assert_eq!(distribution[&TraitVector::new(-2, 0, 0)], 0.25);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let slots: Vec<Vec<TraitVector>> = (0..6)
            .map(|i| {
                vec![
                    TraitVector::new(i, 1, -1),
                    TraitVector::new(-1, i, 2),
                    TraitVector::new(0, -2, i),
                ]
            })
            .collect();
        let distribution = enumerate_totals(&slots, 1_000_000).unwrap();
        let total: f64 = distribution.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_state_limit() {
        let slots: Vec<Vec<TraitVector>> = (0..10)
            .map(|i| {
                vec![
                    TraitVector::new(1 << i, 0, 0),
                    TraitVector::new(0, 1 << i, 0),
                    TraitVector::new(0, 0, 1 << i),
                ]
            })
            .collect();
        let err = enumerate_totals(&slots, 50).unwrap_err();
        assert!(matches!(err, TidecastError::Analysis(_)));
    }

    #[test]
    fn test_exact_report() {
        let weights = WeightTable::new(vec![
            entry(1, "A", 20, 0, 0),
            entry(1, "B", -20, 0, 0),
            entry(2, "A", 0, 0, 0),
        ]);
        let report = ExactAnalyzer::default().run(&weights, 2).unwrap();
        assert_eq!(report.method, AnalysisMethod::Exact);
        assert_eq!(report.states_enumerated, Some(2));
        assert_eq!(report.combination_percentage(Ocean::Pacific, Season::Summer), 50.0);
        assert_eq!(report.combination_percentage(Ocean::Arctic, Season::Winter), 50.0);
        assert_eq!(report.reachability.reachable_combinations, 2);
    }

    #[test]
    fn test_exact_saturates_huge_totals() {
        let weights = WeightTable::new(vec![
            entry(1, "A", i32::MIN, 0, 0),
            entry(2, "A", i32::MIN, 0, 0),
            entry(2, "B", -1, 0, 0),
        ]);
        let report = ExactAnalyzer::default().run(&weights, 2).unwrap();
        // Both branches clamp to the same total.
        assert_eq!(report.states_enumerated, Some(1));
        assert_eq!(report.combination_percentage(Ocean::Arctic, Season::Winter), 100.0);
    }

    #[test]
    fn test_exact_production_model() {
        let weights = WeightTable::new(vec![entry(1, "A", 8, 3, 3), entry(1, "B", 0, -3, -3)]);
        let config = AnalyzerConfig::default().with_model(ClassificationModel::Production);
        let report = ExactAnalyzer::new(config).run(&weights, 1).unwrap();
        assert!(report.is_reachable(Ocean::Pacific, Season::Summer));
        assert!(report.is_reachable(Ocean::Indian, Season::Winter));
        assert_eq!(report.reachability.reachable_combinations, 2);
    }
}
