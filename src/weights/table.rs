//! Choice weight entries and the weight table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TidecastError};
use crate::weights::trait_vector::TraitVector;
use crate::weights::validation::{self, ConfigIssue};

/// Largest live question count the analyzers and coverage checks accept.
pub const MAX_QUESTION_COUNT: u32 = 10_000;

/// Reject question counts above [`MAX_QUESTION_COUNT`].
pub fn ensure_question_count(question_count: u32) -> Result<()> {
    if question_count > MAX_QUESTION_COUNT {
        return Err(TidecastError::invalid_argument(format!(
            "question count {question_count} exceeds the maximum of {MAX_QUESTION_COUNT}"
        )));
    }
    Ok(())
}

/// The atomic configuration unit: what picking `choice` on question
/// `question_id` adds to each trait axis.
///
/// Serialized flat, one row per entry:
///
/// ```
/// use tidecast::weights::ChoiceWeightEntry;
///
/// let entry: ChoiceWeightEntry = serde_json::from_str(
///     r#"{"question_id":1,"choice":"A","energy":2,"positivity":0,"curiosity":-1}"#,
/// ).unwrap();
/// assert_eq!(entry.weights.energy, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WeightRow", into = "WeightRow")]
pub struct ChoiceWeightEntry {
    pub question_id: u32,
    pub choice: String,
    pub weights: TraitVector,
}

impl ChoiceWeightEntry {
    pub fn new<S: Into<String>>(question_id: u32, choice: S, weights: TraitVector) -> Self {
        ChoiceWeightEntry {
            question_id,
            choice: choice.into(),
            weights,
        }
    }

    /// Whether this entry scores the given answer.
    pub fn matches(&self, question_id: u32, choice: &str) -> bool {
        self.question_id == question_id && self.choice == choice
    }
}

/// Flat on-disk row layout shared by the JSON, JSONL and CSV loaders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WeightRow {
    pub question_id: u32,
    pub choice: String,
    #[serde(default)]
    pub energy: i32,
    #[serde(default)]
    pub positivity: i32,
    #[serde(default)]
    pub curiosity: i32,
}

impl From<WeightRow> for ChoiceWeightEntry {
    fn from(row: WeightRow) -> Self {
        ChoiceWeightEntry {
            question_id: row.question_id,
            choice: row.choice.trim().to_string(),
            weights: TraitVector::new(row.energy, row.positivity, row.curiosity),
        }
    }
}

impl From<ChoiceWeightEntry> for WeightRow {
    fn from(entry: ChoiceWeightEntry) -> Self {
        WeightRow {
            question_id: entry.question_id,
            choice: entry.choice,
            energy: entry.weights.energy,
            positivity: entry.weights.positivity,
            curiosity: entry.weights.curiosity,
        }
    }
}

/// All choice weight entries across all questions.
///
/// Construction with [`WeightTable::new`] performs no checks, so the scoring
/// code can run against whatever the configuration store holds. Use
/// [`WeightTable::try_new`] or [`WeightTable::validate`] to enforce the
/// structural invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    entries: Vec<ChoiceWeightEntry>,
}

impl WeightTable {
    /// Create a weight table without validation.
    pub fn new(entries: Vec<ChoiceWeightEntry>) -> Self {
        WeightTable { entries }
    }

    /// Create a weight table, rejecting zero question ids and duplicate
    /// choices within a question.
    pub fn try_new(entries: Vec<ChoiceWeightEntry>) -> Result<Self> {
        let table = WeightTable::new(entries);
        let issues: Vec<ConfigIssue> = table
            .validate(None)
            .into_iter()
            .filter(ConfigIssue::is_fatal)
            .collect();

        if issues.is_empty() {
            Ok(table)
        } else {
            let reasons: Vec<String> = issues.iter().map(ToString::to_string).collect();
            Err(TidecastError::config(reasons.join("; ")))
        }
    }

    pub fn entries(&self) -> &[ChoiceWeightEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: ChoiceWeightEntry) {
        self.entries.push(entry);
    }

    /// First entry scoring `(question_id, choice)`, in insertion order.
    pub fn lookup(&self, question_id: u32, choice: &str) -> Option<&ChoiceWeightEntry> {
        self.entries.iter().find(|e| e.matches(question_id, choice))
    }

    /// Every entry scoring `(question_id, choice)`.
    ///
    /// A well-formed table yields at most one; a table with duplicate choices
    /// yields all of them.
    pub fn matching<'a>(
        &'a self,
        question_id: u32,
        choice: &'a str,
    ) -> impl Iterator<Item = &'a ChoiceWeightEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.matches(question_id, choice))
    }

    /// Entries grouped by question id, each group in insertion order.
    pub fn by_question(&self) -> BTreeMap<u32, Vec<&ChoiceWeightEntry>> {
        let mut groups: BTreeMap<u32, Vec<&ChoiceWeightEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.question_id).or_default().push(entry);
        }
        groups
    }

    /// Distinct question ids that have at least one entry.
    pub fn question_ids(&self) -> BTreeSet<u32> {
        self.entries.iter().map(|e| e.question_id).collect()
    }

    /// Choices configured for one question, in insertion order.
    pub fn choices_for(&self, question_id: u32) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.question_id == question_id)
            .map(|e| e.choice.as_str())
            .collect()
    }

    /// Weight vectors for questions `1..=question_count`, indexed by
    /// `question_id - 1`. Questions without entries get an empty slot.
    ///
    /// `question_count` is clamped to [`MAX_QUESTION_COUNT`].
    pub fn weights_per_question(&self, question_count: u32) -> Vec<Vec<TraitVector>> {
        let question_count = question_count.min(MAX_QUESTION_COUNT);
        let mut slots = vec![Vec::new(); question_count as usize];
        for entry in &self.entries {
            if entry.question_id >= 1 && entry.question_id <= question_count {
                slots[(entry.question_id - 1) as usize].push(entry.weights);
            }
        }
        slots
    }

    /// Check the structural invariants of the table.
    ///
    /// When `question_count` is given, questions `1..=question_count` without
    /// entries and entries beyond `question_count` are reported as well.
    pub fn validate(&self, question_count: Option<u32>) -> Vec<ConfigIssue> {
        validation::validate_table(self, question_count)
    }

    /// Check that every question exposes exactly the expected choices.
    pub fn validate_choices(&self, expected: &BTreeMap<u32, Vec<String>>) -> Vec<ConfigIssue> {
        validation::validate_choices(self, expected)
    }
}

impl FromIterator<ChoiceWeightEntry> for WeightTable {
    fn from_iter<I: IntoIterator<Item = ChoiceWeightEntry>>(iter: I) -> Self {
        WeightTable::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WeightTable {
    type Item = &'a ChoiceWeightEntry;
    type IntoIter = std::slice::Iter<'a, ChoiceWeightEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
