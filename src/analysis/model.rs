//! Outcome formulas used by the analyzers.
//!
//! The composite formula and the production classifier disagree on purpose:
//! the dashboard has always reported the composite view. Both are kept and
//! selected through [`ClassificationModel`].

use crate::analysis::config::{ClassificationModel, CompositeBins};
use crate::classify::labels::{Ocean, Season};
use crate::classify::normalize::normalize;
use crate::weights::TraitVector;

/// Ocean composite score: `curiosity*3 + positivity*2 + energy`.
///
/// Computed in `i64`; six times the `i32` range always fits.
pub fn ocean_composite(totals: &TraitVector) -> i64 {
    i64::from(totals.curiosity) * 3 + i64::from(totals.positivity) * 2 + i64::from(totals.energy)
}

/// Season composite score: `energy*3 + positivity*2 + curiosity`.
pub fn season_composite(totals: &TraitVector) -> i64 {
    i64::from(totals.energy) * 3 + i64::from(totals.positivity) * 2 + i64::from(totals.curiosity)
}

/// Classify trait totals with the composite formula.
pub fn composite_classify(totals: &TraitVector, bins: &CompositeBins) -> (Ocean, Season) {
    let ocean_bin = CompositeBins::bin(ocean_composite(totals), &bins.ocean_bounds);
    let season_bin = CompositeBins::bin(season_composite(totals), &bins.season_bounds);
    (Ocean::ALL[ocean_bin], Season::ALL[season_bin])
}

/// Classify trait totals the way the production classifier does.
pub fn production_classify(totals: &TraitVector) -> (Ocean, Season) {
    (
        Ocean::from_bucket(normalize(totals.energy)),
        Season::from_sum(totals.positivity_plus_curiosity()),
    )
}

impl ClassificationModel {
    /// Outcome for one set of trait totals under this model.
    pub fn outcome(self, totals: &TraitVector, bins: &CompositeBins) -> (Ocean, Season) {
        match self {
            ClassificationModel::Composite => composite_classify(totals, bins),
            ClassificationModel::Production => production_classify(totals),
        }
    }
}
