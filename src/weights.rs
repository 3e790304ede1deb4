//! Weight tables: the per-question, per-choice trait contributions that the
//! classifier and the analyzers consume.
//!
//! A [`WeightTable`] is owned by the administrative configuration flow. The
//! scoring code only ever reads it, and tolerates tables that break the
//! structural invariants checked by [`WeightTable::validate`].

pub mod loader;
pub mod table;
pub mod trait_vector;
pub mod validation;

pub use loader::{
    CsvWeightLoader, JsonWeightLoader, JsonlWeightLoader, WeightTableLoader, load_weight_table,
};
pub use table::{ChoiceWeightEntry, MAX_QUESTION_COUNT, WeightTable, ensure_question_count};
pub use trait_vector::TraitVector;
pub use validation::ConfigIssue;
