//! Quiz answers.
//!
//! An [`AnswerSet`] is what a completed quiz session hands to the classifier:
//! one [`Answer`] per answered question, in the order they were given.
//! Nothing here enforces completeness or uniqueness.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TidecastError};

/// One quiz response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub choice: String,
}

impl Answer {
    pub fn new<S: Into<String>>(question_id: u32, choice: S) -> Self {
        Answer {
            question_id,
            choice: choice.into(),
        }
    }
}

/// An ordered sequence of answers.
///
/// # Examples
///
/// ```
/// use tidecast::answer::AnswerSet;
///
/// let answers = AnswerSet::from_pairs([(1, "A"), (2, "B")]);
/// assert_eq!(answers.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: Vec<Answer>,
}

/// Accepted JSON shapes for an answer set file.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerSetDocument {
    List(Vec<Answer>),
    Map(BTreeMap<String, String>),
}

impl AnswerSet {
    pub fn new(answers: Vec<Answer>) -> Self {
        AnswerSet { answers }
    }

    /// Build an answer set from `(question_id, choice)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(question_id, choice)| Answer::new(question_id, choice))
            .collect()
    }

    pub fn push(&mut self, answer: Answer) {
        self.answers.push(answer);
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Number of answers given per question id.
    pub fn counts_by_question(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for answer in &self.answers {
            *counts.entry(answer.question_id).or_insert(0) += 1;
        }
        counts
    }

    /// Parse an answer set from JSON.
    ///
    /// Either a list of `{"question_id": .., "choice": ..}` objects or an
    /// object mapping question ids to choices (`{"1": "A", "2": "B"}`).
    /// The object form is ordered by question id.
    pub fn from_json(input: &str) -> Result<Self> {
        let document: AnswerSetDocument = serde_json::from_str(input)
            .map_err(|e| TidecastError::parse(format!("Failed to parse answer set: {e}")))?;

        match document {
            AnswerSetDocument::List(answers) => Ok(AnswerSet::new(answers)),
            AnswerSetDocument::Map(map) => {
                let mut answers: Vec<Answer> = Vec::with_capacity(map.len());
                for (key, choice) in map {
                    let question_id = key.trim().parse::<u32>().map_err(|e| {
                        TidecastError::parse(format!("Invalid question id '{key}': {e}"))
                    })?;
                    answers.push(Answer::new(question_id, choice));
                }
                answers.sort_by_key(|a| a.question_id);
                Ok(AnswerSet::new(answers))
            }
        }
    }

    /// Read an answer set from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_json(&input)
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        AnswerSet::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}
