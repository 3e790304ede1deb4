//! Command implementations for Tidecast CLI.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::{AnalyzerConfig, analyze};
use crate::answer::AnswerSet;
use crate::classify::{Validated, classify, classify_strict};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, TidecastError};
use crate::weights::load_weight_table;

/// Execute a CLI command.
pub fn execute_command(args: TidecastArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify_answers(classify_args.clone(), &args),
        Command::Analyze(analyze_args) => analyze_weights(analyze_args.clone(), &args),
        Command::Validate(validate_args) => validate_weights(validate_args.clone(), &args),
    }
}

/// Classify an answer set.
fn classify_answers(args: ClassifyArgs, cli_args: &TidecastArgs) -> Result<()> {
    let weights = load_weight_table(&args.weights)?;
    let answers = AnswerSet::from_json_file(&args.answers)?;
    debug!(
        "Classifying {} answers against {} weight entries",
        answers.len(),
        weights.len()
    );

    let output = if args.strict {
        match classify_strict(&answers, &weights, args.questions) {
            Validated::Ok(result) => ClassifyOutput {
                result: Some(result),
                issues: Vec::new(),
            },
            Validated::Invalid(issues) => ClassifyOutput {
                result: None,
                issues,
            },
        }
    } else {
        ClassifyOutput {
            result: Some(classify(&answers, &weights)),
            issues: Vec::new(),
        }
    };

    output_result("Classification", &output, cli_args)?;

    if output.result.is_none() {
        return Err(TidecastError::invalid_argument(format!(
            "answer set has {} issue(s)",
            output.issues.len()
        )));
    }
    Ok(())
}

/// Estimate the outcome distribution of a weight table.
fn analyze_weights(args: AnalyzeArgs, cli_args: &TidecastArgs) -> Result<()> {
    let config = build_analyzer_config(&args)?;
    let weights = load_weight_table(&args.weights)?;

    let start_time = Instant::now();
    let report = analyze(&weights, args.questions, &config)?;
    info!(
        "Analysis finished in {} ms",
        start_time.elapsed().as_millis()
    );

    output_result("Distribution report", &report, cli_args)
}

/// Merge the optional config file with command line overrides.
pub fn build_analyzer_config(args: &AnalyzeArgs) -> Result<AnalyzerConfig> {
    let mut config = match &args.config_file {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };

    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.parallel {
        config.parallel = true;
    }
    if let Some(threads) = args.threads {
        config.parallel = true;
        config.thread_pool_size = Some(threads);
    }
    if let Some(method) = args.method {
        config.method = method.into();
    }
    if let Some(model) = args.model {
        config.model = model.into();
    }

    config.validate()?;
    Ok(config)
}

/// Check a weight table for structural problems.
fn validate_weights(args: ValidateArgs, cli_args: &TidecastArgs) -> Result<()> {
    let weights = load_weight_table(&args.weights)?;

    let mut issues = weights.validate(args.questions);
    if let Some(choices_file) = &args.choices {
        let expected = load_expected_choices(choices_file)?;
        issues.extend(weights.validate_choices(&expected));
    }

    let output = ValidationOutput {
        entries: weights.len(),
        questions: weights.question_ids().len(),
        issues,
    };
    output_result("Weight table validation", &output, cli_args)?;

    if output.issues.is_empty() {
        Ok(())
    } else {
        Err(TidecastError::config(format!(
            "weight table has {} issue(s)",
            output.issues.len()
        )))
    }
}

/// Read `{"1": ["A", "B"], "2": ["A", "B", "C"]}`.
fn load_expected_choices(path: &Path) -> Result<BTreeMap<u32, Vec<String>>> {
    let input = fs::read_to_string(path)?;
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(&input)?;

    let mut expected = BTreeMap::new();
    for (key, choices) in raw {
        let question_id = key
            .trim()
            .parse::<u32>()
            .map_err(|e| TidecastError::parse(format!("Invalid question id '{key}': {e}")))?;
        expected.insert(question_id, choices);
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisMethod, ClassificationModel};
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn analyze_args(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["tidecast", "analyze", "-w", "w.json", "-n", "5"];
        argv.extend_from_slice(extra);
        match TidecastArgs::try_parse_from(argv).unwrap().command {
            Command::Analyze(args) => args,
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_analyzer_config(&analyze_args(&[])).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_build_config_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"trials": 123, "model": "production", "chunk_size": 10}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = build_analyzer_config(&analyze_args(&[
            "--config-file",
            &path,
            "--trials",
            "456",
            "--threads",
            "2",
            "--method",
            "exact",
        ]))
        .unwrap();

        assert_eq!(config.trials, 456);
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.model, ClassificationModel::Production);
        assert_eq!(config.method, AnalysisMethod::Exact);
        assert!(config.parallel);
        assert_eq!(config.thread_pool_size, Some(2));
    }

    #[test]
    fn test_build_config_rejects_zero_threads() {
        assert!(build_analyzer_config(&analyze_args(&["--threads", "0"])).is_err());
    }

    #[test]
    fn test_load_expected_choices() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"2": ["A", "B"], "1": ["A"]}}"#).unwrap();
        let expected = load_expected_choices(file.path()).unwrap();
        assert_eq!(expected[&1], vec!["A".to_string()]);
        assert_eq!(expected[&2].len(), 2);
    }
}
