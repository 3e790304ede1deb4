//! Outcome tallies and the distribution report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::config::{AnalysisMethod, ClassificationModel};
use crate::classify::labels::{Ocean, Season, composite_code};

/// Number of Ocean × Season combinations.
pub const TOTAL_COMBINATIONS: usize = Ocean::ALL.len() * Season::ALL.len();

/// Probability mass per Ocean × Season combination.
///
/// Monte Carlo runs add `1.0` per trial; the exact analyzer adds each
/// state's probability. Tallies from independent chunks merge by addition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    mass: [[f64; 4]; 5],
    total: f64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ocean: Ocean, season: Season, weight: f64) {
        self.mass[ocean.index()][season.index()] += weight;
        self.total += weight;
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        for (row, other_row) in self.mass.iter_mut().zip(other.mass.iter()) {
            for (cell, other_cell) in row.iter_mut().zip(other_row.iter()) {
                *cell += other_cell;
            }
        }
        self.total += other.total;
        self
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn combination(&self, ocean: Ocean, season: Season) -> f64 {
        self.mass[ocean.index()][season.index()]
    }

    pub fn ocean(&self, ocean: Ocean) -> f64 {
        self.mass[ocean.index()].iter().sum()
    }

    pub fn season(&self, season: Season) -> f64 {
        self.mass.iter().map(|row| row[season.index()]).sum()
    }

    fn percentage(&self, mass: f64) -> f64 {
        if self.total > 0.0 {
            mass * 100.0 / self.total
        } else {
            0.0
        }
    }
}

/// Share of outcomes with a given ocean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanShare {
    pub ocean: Ocean,
    pub percentage: f64,
}

/// Share of outcomes with a given season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonShare {
    pub season: Season,
    pub percentage: f64,
}

/// Share of outcomes with a given Ocean × Season combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationShare {
    pub ocean: Ocean,
    pub season: Season,
    pub code: String,
    pub percentage: f64,
}

/// Which outcomes were observed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reachability {
    /// Combinations observed at least once.
    pub reachable_combinations: usize,
    /// Always 20.
    pub total_combinations: usize,
    /// Combinations never observed, in ocean then season order.
    pub unreachable: Vec<(Ocean, Season)>,
    /// Distinct oceans observed, out of 5.
    pub oceans_covered: usize,
    /// Distinct seasons observed, out of 4.
    pub seasons_covered: usize,
}

impl Reachability {
    fn from_tally(tally: &Tally) -> Self {
        let mut unreachable = Vec::new();
        for ocean in Ocean::ALL {
            for season in Season::ALL {
                if tally.combination(ocean, season) <= 0.0 {
                    unreachable.push((ocean, season));
                }
            }
        }

        Reachability {
            reachable_combinations: TOTAL_COMBINATIONS - unreachable.len(),
            total_combinations: TOTAL_COMBINATIONS,
            unreachable,
            oceans_covered: Ocean::ALL.iter().filter(|&&o| tally.ocean(o) > 0.0).count(),
            seasons_covered: Season::ALL
                .iter()
                .filter(|&&s| tally.season(s) > 0.0)
                .count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unreachable.is_empty()
    }
}

/// Distribution of outcomes for a weight table.
///
/// Under Monte Carlo a combination is reported reachable only if it was
/// actually sampled, so `reachable` is never a false positive; rare
/// combinations may be missed. Under exact enumeration reachability is exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub method: AnalysisMethod,
    pub model: ClassificationModel,
    /// Simulated trials (0 for exact enumeration).
    pub trials: usize,
    /// Seed used by the Monte Carlo run.
    pub seed: Option<u64>,
    /// Distinct trait totals enumerated by an exact run.
    pub states_enumerated: Option<usize>,
    pub question_count: u32,
    /// Live questions without weight entries. They contribute nothing to
    /// any trial and bias results toward neutral outcomes.
    pub empty_questions: Vec<u32>,
    pub ocean_distribution: Vec<OceanShare>,
    pub season_distribution: Vec<SeasonShare>,
    pub combination_distribution: Vec<CombinationShare>,
    pub reachability: Reachability,
}

/// Run parameters recorded alongside a tally.
#[derive(Debug, Clone)]
pub(crate) struct RunInfo {
    pub method: AnalysisMethod,
    pub model: ClassificationModel,
    pub trials: usize,
    pub seed: Option<u64>,
    pub states_enumerated: Option<usize>,
    pub question_count: u32,
    pub empty_questions: Vec<u32>,
}

impl DistributionReport {
    pub(crate) fn from_tally(tally: &Tally, info: RunInfo) -> Self {
        let ocean_distribution = Ocean::ALL
            .into_iter()
            .map(|ocean| OceanShare {
                ocean,
                percentage: tally.percentage(tally.ocean(ocean)),
            })
            .collect();

        let season_distribution = Season::ALL
            .into_iter()
            .map(|season| SeasonShare {
                season,
                percentage: tally.percentage(tally.season(season)),
            })
            .collect();

        let mut combination_distribution = Vec::with_capacity(TOTAL_COMBINATIONS);
        for ocean in Ocean::ALL {
            for season in Season::ALL {
                combination_distribution.push(CombinationShare {
                    ocean,
                    season,
                    code: composite_code(ocean, season),
                    percentage: tally.percentage(tally.combination(ocean, season)),
                });
            }
        }

        DistributionReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            method: info.method,
            model: info.model,
            trials: info.trials,
            seed: info.seed,
            states_enumerated: info.states_enumerated,
            question_count: info.question_count,
            empty_questions: info.empty_questions,
            ocean_distribution,
            season_distribution,
            combination_distribution,
            reachability: Reachability::from_tally(tally),
        }
    }

    pub fn ocean_percentage(&self, ocean: Ocean) -> f64 {
        self.ocean_distribution
            .iter()
            .find(|share| share.ocean == ocean)
            .map_or(0.0, |share| share.percentage)
    }

    pub fn season_percentage(&self, season: Season) -> f64 {
        self.season_distribution
            .iter()
            .find(|share| share.season == season)
            .map_or(0.0, |share| share.percentage)
    }

    pub fn combination_percentage(&self, ocean: Ocean, season: Season) -> f64 {
        self.combination_distribution
            .iter()
            .find(|share| share.ocean == ocean && share.season == season)
            .map_or(0.0, |share| share.percentage)
    }

    pub fn is_reachable(&self, ocean: Ocean, season: Season) -> bool {
        !self.reachability.unreachable.contains(&(ocean, season))
    }

    /// Reached combinations, in ocean then season order.
    pub fn reachable(&self) -> Vec<(Ocean, Season)> {
        let mut reached = Vec::new();
        for ocean in Ocean::ALL {
            for season in Season::ALL {
                if self.is_reachable(ocean, season) {
                    reached.push((ocean, season));
                }
            }
        }
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> RunInfo {
        RunInfo {
            method: AnalysisMethod::MonteCarlo,
            model: ClassificationModel::Composite,
            trials: 4,
            seed: Some(1),
            states_enumerated: None,
            question_count: 2,
            empty_questions: Vec::new(),
        }
    }

    #[test]
    fn test_tally_merge() {
        let mut a = Tally::new();
        a.record(Ocean::Indian, Season::Spring, 1.0);
        let mut b = Tally::new();
        b.record(Ocean::Indian, Season::Spring, 2.0);
        b.record(Ocean::Arctic, Season::Winter, 1.0);

        let merged = a.merge(b);
        assert_eq!(merged.total(), 4.0);
        assert_eq!(merged.combination(Ocean::Indian, Season::Spring), 3.0);
        assert_eq!(merged.ocean(Ocean::Arctic), 1.0);
        assert_eq!(merged.season(Season::Spring), 3.0);
    }

    #[test]
    fn test_report_percentages_and_reachability() {
        let mut tally = Tally::new();
        tally.record(Ocean::Indian, Season::Spring, 3.0);
        tally.record(Ocean::Pacific, Season::Summer, 1.0);

        let report = DistributionReport::from_tally(&tally, info());
        assert_eq!(report.ocean_percentage(Ocean::Indian), 75.0);
        assert_eq!(report.season_percentage(Season::Summer), 25.0);
        assert_eq!(report.combination_percentage(Ocean::Pacific, Season::Summer), 25.0);
        assert_eq!(report.reachability.reachable_combinations, 2);
        assert_eq!(report.reachability.unreachable.len(), 18);
        assert_eq!(report.reachability.oceans_covered, 2);
        assert_eq!(report.reachability.seasons_covered, 2);
        assert_eq!(
            report.reachable(),
            vec![(Ocean::Indian, Season::Spring), (Ocean::Pacific, Season::Summer)]
        );
        assert_eq!(report.combination_distribution.len(), TOTAL_COMBINATIONS);
    }

    #[test]
    fn test_empty_tally() {
        let report = DistributionReport::from_tally(&Tally::new(), info());
        assert!(report.ocean_distribution.iter().all(|s| s.percentage == 0.0));
        assert_eq!(report.reachability.reachable_combinations, 0);
        assert_eq!(report.reachability.oceans_covered, 0);
        assert!(!report.reachability.is_complete());
    }
}
