//! The production classifier.

use serde::{Deserialize, Serialize};

use crate::answer::AnswerSet;
use crate::classify::labels::{Ocean, Season, composite_code};
use crate::classify::normalize::normalize;
use crate::weights::{TraitVector, WeightTable};

/// Per-axis normalized buckets, each in `[-2, 2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedScores {
    pub energy: i8,
    pub positivity: i8,
    pub curiosity: i8,
}

impl NormalizedScores {
    pub fn from_totals(totals: &TraitVector) -> Self {
        NormalizedScores {
            energy: normalize(totals.energy),
            positivity: normalize(totals.positivity),
            curiosity: normalize(totals.curiosity),
        }
    }
}

/// Outcome of classifying one answer set.
///
/// `scores` holds the normalized buckets; `totals` the raw sums they were
/// derived from. Season is taken from the raw sums, not the buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub ocean: Ocean,
    pub season: Season,
    pub code: String,
    pub scores: NormalizedScores,
    pub totals: TraitVector,
}

impl ClassificationResult {
    /// Classify already summed trait totals.
    pub fn from_totals(totals: TraitVector) -> Self {
        let scores = NormalizedScores::from_totals(&totals);
        let ocean = Ocean::from_bucket(scores.energy);
        let season = Season::from_sum(totals.positivity_plus_curiosity());

        ClassificationResult {
            ocean,
            season,
            code: composite_code(ocean, season),
            scores,
            totals,
        }
    }
}

/// Raw trait totals for an answer set.
///
/// Answers without a matching entry are skipped. Every matching entry
/// contributes, so duplicate answers (or duplicate entries) add up.
pub fn compute_totals(answers: &AnswerSet, weights: &WeightTable) -> TraitVector {
    let mut totals = TraitVector::ZERO;
    for answer in answers {
        for entry in weights.matching(answer.question_id, &answer.choice) {
            totals += entry.weights;
        }
    }
    totals
}

/// Classify a completed quiz.
///
/// Never fails. Ocean comes from the normalized Energy bucket, Season from
/// the unnormalized Positivity + Curiosity sum.
///
/// # Examples
///
/// ```
/// use tidecast::answer::AnswerSet;
/// use tidecast::classify::{Ocean, Season, classify};
/// use tidecast::weights::{ChoiceWeightEntry, TraitVector, WeightTable};
///
/// let weights = WeightTable::new(vec![
///     ChoiceWeightEntry::new(1, "A", TraitVector::new(1, 1, 0)),
///     ChoiceWeightEntry::new(2, "B", TraitVector::new(0, 1, 1)),
/// ]);
/// let answers = AnswerSet::from_pairs([(1, "A"), (2, "B")]);
///
/// let result = classify(&answers, &weights);
/// assert_eq!(result.ocean, Ocean::Indian);
/// assert_eq!(result.season, Season::Spring);
/// assert_eq!(result.code, "indian-spring");
/// ```
pub fn classify(answers: &AnswerSet, weights: &WeightTable) -> ClassificationResult {
    ClassificationResult::from_totals(compute_totals(answers, weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::ChoiceWeightEntry;

    fn table(rows: &[(u32, &str, i32, i32, i32)]) -> WeightTable {
        rows.iter()
            .map(|&(q, c, e, p, cu)| ChoiceWeightEntry::new(q, c, TraitVector::new(e, p, cu)))
            .collect()
    }

    #[test]
    fn test_worked_example() {
        let weights = table(&[(1, "A", 1, 1, 0), (2, "B", 0, 1, 1)]);
        let answers = AnswerSet::from_pairs([(1, "A"), (2, "B")]);

        let result = classify(&answers, &weights);
        assert_eq!(result.totals, TraitVector::new(1, 2, 1));
        assert_eq!(result.scores, NormalizedScores::default());
        assert_eq!(result.ocean, Ocean::Indian);
        assert_eq!(result.season, Season::Spring);
    }

    #[test]
    fn test_empty_answer_set() {
        let weights = table(&[(1, "A", 5, 5, 5)]);
        let result = classify(&AnswerSet::default(), &weights);
        assert_eq!(result.totals, TraitVector::ZERO);
        assert_eq!(result.scores, NormalizedScores::default());
        assert_eq!(result.ocean, Ocean::Indian);
        assert_eq!(result.season, Season::Spring);
        assert_eq!(result.code, "indian-spring");
    }

    #[test]
    fn test_unmatched_answers_are_skipped() {
        let weights = table(&[(1, "A", 4, 0, 0)]);
        let with_noise = AnswerSet::from_pairs([(1, "A"), (1, "Z"), (99, "A")]);
        let clean = AnswerSet::from_pairs([(1, "A")]);
        assert_eq!(
            compute_totals(&with_noise, &weights),
            compute_totals(&clean, &weights)
        );
    }

    #[test]
    fn test_duplicate_answers_accumulate() {
        let weights = table(&[(1, "A", 3, 0, 0)]);
        let answers = AnswerSet::from_pairs([(1, "A"), (1, "A"), (1, "A")]);
        let result = classify(&answers, &weights);
        assert_eq!(result.totals.energy, 9);
        assert_eq!(result.ocean, Ocean::Pacific);
    }

    #[test]
    fn test_season_uses_raw_sum_not_buckets() {
        // P=2 and C=2 each normalize to 0, but the raw sum 4 vs 5 crosses
        // the Spring/Summer boundary.
        let weights = table(&[(1, "A", 0, 2, 2), (1, "B", 0, 2, 3)]);
        let spring = classify(&AnswerSet::from_pairs([(1, "A")]), &weights);
        let summer = classify(&AnswerSet::from_pairs([(1, "B")]), &weights);
        assert_eq!(spring.scores.positivity, 0);
        assert_eq!(spring.season, Season::Spring);
        assert_eq!(summer.season, Season::Summer);
    }

    #[test]
    fn test_ocean_extremes() {
        let weights = table(&[(1, "A", -8, 0, 0), (1, "B", 8, 0, 0)]);
        assert_eq!(
            classify(&AnswerSet::from_pairs([(1, "A")]), &weights).ocean,
            Ocean::Arctic
        );
        assert_eq!(
            classify(&AnswerSet::from_pairs([(1, "B")]), &weights).ocean,
            Ocean::Pacific
        );
    }

    #[test]
    fn test_deterministic() {
        let weights = table(&[(1, "A", 2, -3, 1), (2, "B", 5, 1, -4), (3, "C", -1, 0, 2)]);
        let answers = AnswerSet::from_pairs([(1, "A"), (2, "B"), (3, "C")]);
        let first = classify(&answers, &weights);
        for _ in 0..10 {
            assert_eq!(classify(&answers, &weights), first);
        }
    }
}
