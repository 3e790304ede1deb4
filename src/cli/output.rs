//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::report::DistributionReport;
use crate::classify::{AnswerIssue, ClassificationResult};
use crate::cli::args::{OutputFormat, TidecastArgs};
use crate::error::Result;
use crate::weights::ConfigIssue;

/// Rendering of a command result for terminals.
pub trait HumanOutput {
    fn render_human(&self, args: &TidecastArgs) -> String;
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyOutput {
    pub result: Option<ClassificationResult>,
    pub issues: Vec<AnswerIssue>,
}

/// Result structure for weight table validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationOutput {
    pub entries: usize,
    pub questions: usize,
    pub issues: Vec<ConfigIssue>,
}

impl ValidationOutput {
    pub fn has_fatal(&self) -> bool {
        self.issues.iter().any(ConfigIssue::is_fatal)
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &TidecastArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            print!("{}", result.render_human(args));
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

impl HumanOutput for ClassifyOutput {
    fn render_human(&self, _args: &TidecastArgs) -> String {
        let mut out = String::new();

        if let Some(result) = &self.result {
            out.push_str(&format!("Result: {}\n", result.code));
            out.push_str(&format!("  Ocean:  {}\n", result.ocean));
            out.push_str(&format!("  Season: {}\n", result.season));
            out.push_str(&format!(
                "  Scores: energy {:+}, positivity {:+}, curiosity {:+}\n",
                result.scores.energy, result.scores.positivity, result.scores.curiosity
            ));
            out.push_str(&format!("  Totals: {}\n", result.totals));
        }

        if !self.issues.is_empty() {
            out.push_str("Answer set rejected:\n");
            for issue in &self.issues {
                out.push_str(&format!("  - {issue}\n"));
            }
        }

        out
    }
}

impl HumanOutput for DistributionReport {
    fn render_human(&self, args: &TidecastArgs) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "Method: {:?}  Model: {:?}  Questions: {}\n",
            self.method, self.model, self.question_count
        ));
        if self.trials > 0 {
            out.push_str(&format!("Trials: {}", self.trials));
            if let Some(seed) = self.seed {
                out.push_str(&format!("  Seed: {seed}"));
            }
            out.push('\n');
        }
        if let Some(states) = self.states_enumerated {
            out.push_str(&format!("States enumerated: {states}\n"));
        }

        out.push_str("\nOceans:\n");
        for share in &self.ocean_distribution {
            out.push_str(&format!("  {:<10} {:>6.2}%\n", share.ocean.as_str(), share.percentage));
        }

        out.push_str("\nSeasons:\n");
        for share in &self.season_distribution {
            out.push_str(&format!("  {:<10} {:>6.2}%\n", share.season.as_str(), share.percentage));
        }

        if args.verbosity() > 1 {
            out.push_str("\nCombinations:\n");
            for share in &self.combination_distribution {
                out.push_str(&format!("  {:<18} {:>6.2}%\n", share.code, share.percentage));
            }
        }

        let reach = &self.reachability;
        out.push_str(&format!(
            "\nReachable combinations: {}/{}  (oceans {}/5, seasons {}/4)\n",
            reach.reachable_combinations,
            reach.total_combinations,
            reach.oceans_covered,
            reach.seasons_covered
        ));
        if !reach.unreachable.is_empty() {
            let codes: Vec<String> = reach
                .unreachable
                .iter()
                .map(|(ocean, season)| format!("{ocean}-{season}"))
                .collect();
            out.push_str(&format!("Never observed: {}\n", codes.join(", ")));
        }

        if !self.empty_questions.is_empty() {
            out.push_str(&format!(
                "Warning: questions without weights: {:?}\n",
                self.empty_questions
            ));
        }

        out
    }
}

impl HumanOutput for ValidationOutput {
    fn render_human(&self, _args: &TidecastArgs) -> String {
        let mut out = format!(
            "{} entries across {} questions\n",
            self.entries, self.questions
        );
        if self.issues.is_empty() {
            out.push_str("No issues found\n");
        } else {
            for issue in &self.issues {
                let level = if issue.is_fatal() { "error" } else { "warning" };
                out.push_str(&format!("  [{level}] {issue}\n"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Ocean, Season};
    use clap::Parser;

    fn args() -> TidecastArgs {
        TidecastArgs::try_parse_from(["tidecast", "validate", "-w", "w.json"]).unwrap()
    }

    #[test]
    fn test_classify_output_human() {
        let output = ClassifyOutput {
            result: Some(ClassificationResult::from_totals(
                crate::weights::TraitVector::new(9, 3, 3),
            )),
            issues: Vec::new(),
        };
        let text = output.render_human(&args());
        assert!(text.contains("Result: pacific-summer"));
        assert!(text.contains(&format!("Ocean:  {}", Ocean::Pacific)));
        assert!(text.contains(&format!("Season: {}", Season::Summer)));
        assert!(text.contains("energy +2"));
    }

    #[test]
    fn test_validation_output_levels() {
        let output = ValidationOutput {
            entries: 3,
            questions: 2,
            issues: vec![
                ConfigIssue::DuplicateChoice {
                    question_id: 1,
                    choice: "A".to_string(),
                },
                ConfigIssue::EmptyQuestion { question_id: 3 },
            ],
        };
        assert!(output.has_fatal());
        let text = output.render_human(&args());
        assert!(text.contains("[error]"));
        assert!(text.contains("[warning]"));
    }
}
