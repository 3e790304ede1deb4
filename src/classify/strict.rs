//! Opt-in validation around the permissive classifier.
//!
//! The classifier accepts any answer set. Callers that want to refuse
//! degraded input use [`classify_strict`], which checks the answers first and
//! only then delegates to [`classify`] unchanged.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answer::AnswerSet;
use crate::classify::classifier::{ClassificationResult, classify};
use crate::weights::WeightTable;

/// A reason an answer set would be classified in degraded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerIssue {
    /// The `(question_id, choice)` pair has no weight entry.
    UnknownChoice { question_id: u32, choice: String },
    /// The question was answered more than once.
    DuplicateQuestion { question_id: u32, count: usize },
    /// A scored question in `1..=question_count` has no answer.
    MissingQuestion { question_id: u32 },
}

impl fmt::Display for AnswerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerIssue::UnknownChoice {
                question_id,
                choice,
            } => write!(f, "question {question_id}: choice '{choice}' has no weights"),
            AnswerIssue::DuplicateQuestion { question_id, count } => {
                write!(f, "question {question_id}: answered {count} times")
            }
            AnswerIssue::MissingQuestion { question_id } => {
                write!(f, "question {question_id}: not answered")
            }
        }
    }
}

/// Result of [`classify_strict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Validated {
    Ok(ClassificationResult),
    Invalid(Vec<AnswerIssue>),
}

impl Validated {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validated::Ok(_))
    }

    pub fn ok(self) -> Option<ClassificationResult> {
        match self {
            Validated::Ok(result) => Some(result),
            Validated::Invalid(_) => None,
        }
    }
}

/// List every issue with an answer set.
///
/// Missing questions are only checked when `question_count` is given, and
/// only for questions that have weight entries (an unscored question cannot
/// change the result).
pub fn validate_answers(
    answers: &AnswerSet,
    weights: &WeightTable,
    question_count: Option<u32>,
) -> Vec<AnswerIssue> {
    let mut issues = Vec::new();

    for answer in answers {
        if weights.lookup(answer.question_id, &answer.choice).is_none() {
            issues.push(AnswerIssue::UnknownChoice {
                question_id: answer.question_id,
                choice: answer.choice.clone(),
            });
        }
    }

    let counts = answers.counts_by_question();
    for (&question_id, &count) in &counts {
        if count > 1 {
            issues.push(AnswerIssue::DuplicateQuestion { question_id, count });
        }
    }

    if let Some(question_count) = question_count {
        let scored: BTreeSet<u32> = weights.question_ids();
        for &question_id in scored.iter().filter(|&&id| id >= 1 && id <= question_count) {
            if !counts.contains_key(&question_id) {
                issues.push(AnswerIssue::MissingQuestion { question_id });
            }
        }
    }

    issues
}

/// Classify only if the answer set has no issues.
pub fn classify_strict(
    answers: &AnswerSet,
    weights: &WeightTable,
    question_count: Option<u32>,
) -> Validated {
    let issues = validate_answers(answers, weights, question_count);
    if issues.is_empty() {
        Validated::Ok(classify(answers, weights))
    } else {
        Validated::Invalid(issues)
    }
}
