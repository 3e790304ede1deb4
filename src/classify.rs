//! Production classification of a completed quiz.
//!
//! [`classify`] turns an [`AnswerSet`](crate::answer::AnswerSet) and a
//! [`WeightTable`](crate::weights::WeightTable) into an Ocean × Season result.
//! It never fails: unmatched answers contribute nothing and duplicate answers
//! all count. [`classify_strict`] layers explicit input validation on top
//! without changing that behavior.

pub mod classifier;
pub mod labels;
pub mod normalize;
pub mod strict;

pub use classifier::{ClassificationResult, NormalizedScores, classify, compute_totals};
pub use labels::{Ocean, Season};
pub use normalize::normalize;
pub use strict::{AnswerIssue, Validated, classify_strict, validate_answers};
