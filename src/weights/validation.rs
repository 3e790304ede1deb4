//! Structural checks for weight tables.
//!
//! The scoring code never rejects a table; these checks exist so the admin
//! tooling can warn before a table is saved.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::weights::table::{MAX_QUESTION_COUNT, WeightTable};

/// A problem found in a weight table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigIssue {
    /// The same choice appears more than once for a question.
    DuplicateChoice { question_id: u32, choice: String },
    /// An entry uses question id 0.
    ZeroQuestionId { choice: String },
    /// An entry has an empty choice label.
    EmptyChoice { question_id: u32 },
    /// A live question has no entries and will always contribute nothing.
    EmptyQuestion { question_id: u32 },
    /// Entries exist for a question beyond the live question count.
    OutOfRangeQuestion { question_id: u32 },
    /// A choice offered to quiz-takers has no entry.
    MissingChoice { question_id: u32, choice: String },
    /// An entry exists for a choice quiz-takers are never offered.
    OrphanChoice { question_id: u32, choice: String },
}

impl ConfigIssue {
    /// Issues that make a table structurally invalid, as opposed to
    /// coverage warnings.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConfigIssue::DuplicateChoice { .. }
                | ConfigIssue::ZeroQuestionId { .. }
                | ConfigIssue::EmptyChoice { .. }
        )
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::DuplicateChoice {
                question_id,
                choice,
            } => write!(f, "question {question_id}: choice '{choice}' is defined more than once"),
            ConfigIssue::ZeroQuestionId { choice } => {
                write!(f, "choice '{choice}' uses question id 0")
            }
            ConfigIssue::EmptyChoice { question_id } => {
                write!(f, "question {question_id}: entry has an empty choice label")
            }
            ConfigIssue::EmptyQuestion { question_id } => {
                write!(f, "question {question_id}: no weight entries, answers will not be scored")
            }
            ConfigIssue::OutOfRangeQuestion { question_id } => {
                write!(f, "question {question_id}: entries beyond the live question count")
            }
            ConfigIssue::MissingChoice {
                question_id,
                choice,
            } => write!(f, "question {question_id}: offered choice '{choice}' has no weights"),
            ConfigIssue::OrphanChoice {
                question_id,
                choice,
            } => write!(f, "question {question_id}: choice '{choice}' is never offered"),
        }
    }
}

pub(crate) fn validate_table(table: &WeightTable, question_count: Option<u32>) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut seen: BTreeSet<(u32, &str)> = BTreeSet::new();
    let mut reported: BTreeSet<(u32, &str)> = BTreeSet::new();

    for entry in table.entries() {
        if entry.question_id == 0 {
            issues.push(ConfigIssue::ZeroQuestionId {
                choice: entry.choice.clone(),
            });
        }
        if entry.choice.is_empty() {
            issues.push(ConfigIssue::EmptyChoice {
                question_id: entry.question_id,
            });
        }

        let key = (entry.question_id, entry.choice.as_str());
        if !seen.insert(key) && reported.insert(key) {
            issues.push(ConfigIssue::DuplicateChoice {
                question_id: entry.question_id,
                choice: entry.choice.clone(),
            });
        }
    }

    if let Some(count) = question_count {
        let present = table.question_ids();
        for question_id in 1..=count.min(MAX_QUESTION_COUNT) {
            if !present.contains(&question_id) {
                issues.push(ConfigIssue::EmptyQuestion { question_id });
            }
        }
        for &question_id in present.iter().filter(|&&id| id > count) {
            issues.push(ConfigIssue::OutOfRangeQuestion { question_id });
        }
    }

    issues
}

pub(crate) fn validate_choices(
    table: &WeightTable,
    expected: &BTreeMap<u32, Vec<String>>,
) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let configured = table.by_question();

    for (&question_id, offered) in expected {
        let present: BTreeSet<&str> = configured
            .get(&question_id)
            .map(|entries| entries.iter().map(|e| e.choice.as_str()).collect())
            .unwrap_or_default();
        let offered_set: BTreeSet<&str> = offered.iter().map(String::as_str).collect();

        for choice in offered_set.difference(&present) {
            issues.push(ConfigIssue::MissingChoice {
                question_id,
                choice: choice.to_string(),
            });
        }
        for choice in present.difference(&offered_set) {
            issues.push(ConfigIssue::OrphanChoice {
                question_id,
                choice: choice.to_string(),
            });
        }
    }

    for (&question_id, entries) in &configured {
        if !expected.contains_key(&question_id) {
            for entry in entries {
                issues.push(ConfigIssue::OrphanChoice {
                    question_id,
                    choice: entry.choice.clone(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::{ChoiceWeightEntry, TraitVector};

    fn entry(question_id: u32, choice: &str) -> ChoiceWeightEntry {
        ChoiceWeightEntry::new(question_id, choice, TraitVector::ZERO)
    }

    #[test]
    fn test_well_formed_table_has_no_issues() {
        let table = WeightTable::new(vec![entry(1, "A"), entry(1, "B"), entry(2, "A")]);
        assert!(table.validate(Some(2)).is_empty());
    }

    #[test]
    fn test_duplicate_choice_reported_once() {
        let table = WeightTable::new(vec![entry(1, "A"), entry(1, "A"), entry(1, "A")]);
        let issues = table.validate(None);
        assert_eq!(
            issues,
            vec![ConfigIssue::DuplicateChoice {
                question_id: 1,
                choice: "A".to_string()
            }]
        );
        assert!(issues[0].is_fatal());
    }

    #[test]
    fn test_coverage_warnings() {
        let table = WeightTable::new(vec![entry(1, "A"), entry(4, "A")]);
        let issues = table.validate(Some(3));
        assert!(issues.contains(&ConfigIssue::EmptyQuestion { question_id: 2 }));
        assert!(issues.contains(&ConfigIssue::EmptyQuestion { question_id: 3 }));
        assert!(issues.contains(&ConfigIssue::OutOfRangeQuestion { question_id: 4 }));
        assert!(issues.iter().all(|issue| !issue.is_fatal()));
    }

    #[test]
    fn test_zero_question_and_empty_choice() {
        let table = WeightTable::new(vec![entry(0, "A"), entry(2, "")]);
        let issues = table.validate(None);
        assert!(issues.contains(&ConfigIssue::ZeroQuestionId {
            choice: "A".to_string()
        }));
        assert!(issues.contains(&ConfigIssue::EmptyChoice { question_id: 2 }));
    }

    #[test]
    fn test_validate_choices_missing_and_orphan() {
        let table = WeightTable::new(vec![entry(1, "A"), entry(1, "D"), entry(3, "A")]);
        let mut expected = BTreeMap::new();
        expected.insert(1, vec!["A".to_string(), "B".to_string()]);

        let issues = table.validate_choices(&expected);
        assert!(issues.contains(&ConfigIssue::MissingChoice {
            question_id: 1,
            choice: "B".to_string()
        }));
        assert!(issues.contains(&ConfigIssue::OrphanChoice {
            question_id: 1,
            choice: "D".to_string()
        }));
        assert!(issues.contains(&ConfigIssue::OrphanChoice {
            question_id: 3,
            choice: "A".to_string()
        }));
    }

    #[test]
    fn test_display() {
        let issue = ConfigIssue::EmptyQuestion { question_id: 7 };
        assert_eq!(
            issue.to_string(),
            "question 7: no weight entries, answers will not be scored"
        );
    }
}
