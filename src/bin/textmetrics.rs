//! textmetrics: compare strings from the command line.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use textmetrics::algorithms::normalize::normalize;
use textmetrics::{
    best_matches, try_damerau_levenshtein_distance, JaroWinklerConfig, MetricKind, Normalization,
    Scorer, DEFAULT_PREFIX_SIZE, DEFAULT_WEIGHT_THRESHOLD,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "textmetrics")]
#[command(version, about = "Jaro-Winkler and Damerau-Levenshtein string metrics", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    2  Invalid arguments

EXAMPLES:
    # Jaro-Winkler distance
    textmetrics compare MARTHA MARHTA

    # Damerau-Levenshtein edit count
    textmetrics compare kitten kittne --metric dl

    # Rank candidates against a query
    textmetrics rank apple appel banana apply --limit 2")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two strings
    Compare(CompareArgs),
    /// Rank candidates by similarity to a query
    Rank(RankArgs),
}

#[derive(Args)]
struct MetricArgs {
    /// Metric: jaro_winkler (jw) or damerau_levenshtein (dl)
    #[arg(short, long, default_value = "jaro_winkler")]
    metric: String,

    /// Jaro-Winkler: maximum prefix length that earns a boost
    #[arg(long, default_value_t = DEFAULT_PREFIX_SIZE)]
    prefix_size: usize,

    /// Jaro-Winkler: weight above which the prefix boost applies, in [0, 1]
    #[arg(long, default_value_t = DEFAULT_WEIGHT_THRESHOLD)]
    weight_threshold: f64,

    /// Normalize input first: lowercase, unicode_nfkd, remove_punctuation, remove_whitespace, strict
    #[arg(short, long, env = "TEXTMETRICS_NORMALIZE")]
    normalize: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl MetricArgs {
    fn scorer(&self) -> Result<Scorer> {
        let metric: MetricKind = self.metric.parse()?;
        let normalization = self
            .normalize
            .as_deref()
            .map(str::parse::<Normalization>)
            .transpose()?;
        let scorer = Scorer::new(metric)
            .with_jaro_winkler_config(JaroWinklerConfig::new(
                self.prefix_size,
                self.weight_threshold,
            ))
            .with_normalization(normalization);
        scorer.validate()?;
        Ok(scorer)
    }
}

#[derive(Args)]
struct CompareArgs {
    source: String,
    target: String,

    /// Report similarity (1 - distance) instead of distance
    #[arg(short, long)]
    similarity: bool,

    #[command(flatten)]
    metric: MetricArgs,
}

#[derive(Args)]
struct RankArgs {
    query: String,

    #[arg(required = true)]
    candidates: Vec<String>,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    /// Drop results below this similarity
    #[arg(long, default_value_t = 0.0)]
    min_similarity: f64,

    #[command(flatten)]
    metric: MetricArgs,
}

/// A single reported number with its unit.
#[derive(Serialize)]
struct Measurement {
    metric: MetricKind,
    unit: &'static str,
    value: f64,
}

/// Compute the number `compare` reports, labeled with its unit.
fn measure(args: &CompareArgs) -> Result<Measurement> {
    let scorer = args.metric.scorer()?;

    let measurement = match (scorer.metric, args.similarity) {
        (MetricKind::DamerauLevenshtein, false) => {
            // Raw edit count rather than the normalized batch distance
            let source = normalize(&args.source, scorer.normalization);
            let target = normalize(&args.target, scorer.normalization);
            let edits = try_damerau_levenshtein_distance(Some(&*source), Some(&*target))?;
            Measurement {
                metric: scorer.metric,
                unit: "edits",
                value: edits as f64,
            }
        }
        (metric, similarity) => {
            let score = scorer.score(&args.source, &args.target)?;
            let (unit, value) = if similarity {
                ("similarity", score.similarity)
            } else {
                ("distance", score.distance)
            };
            Measurement { metric, unit, value }
        }
    };
    Ok(measurement)
}

fn compare(args: &CompareArgs) -> Result<()> {
    let measurement = measure(args)?;

    if args.metric.json {
        println!("{}", serde_json::to_string(&measurement).context("serializing result")?);
    } else if measurement.unit == "edits" {
        println!("{} edits", measurement.value);
    } else {
        println!("{} {:.6}", measurement.unit, measurement.value);
    }
    Ok(())
}

fn rank(args: &RankArgs) -> Result<()> {
    let scorer = args.metric.scorer()?;
    let results = best_matches(
        &args.candidates,
        &args.query,
        &scorer,
        args.limit,
        args.min_similarity,
    )?;

    if args.metric.json {
        println!("{}", serde_json::to_string_pretty(&results).context("serializing results")?);
        return Ok(());
    }

    if results.is_empty() {
        tracing::info!("No candidate reached the similarity threshold");
    }
    for r in &results {
        println!("{:.6}  {}", r.similarity, r.text);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match &cli.command {
        Commands::Compare(args) => compare(args),
        Commands::Rank(args) => rank(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_args(argv: &[&str]) -> CompareArgs {
        let argv = ["textmetrics", "compare"].into_iter().chain(argv.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Compare(args) => args,
            Commands::Rank(_) => unreachable!("parsed a compare command"),
        }
    }

    #[test]
    fn test_jaro_winkler_reports_distance() {
        let m = measure(&compare_args(&["MARTHA", "MARHTA"])).unwrap();
        assert_eq!(m.metric, MetricKind::JaroWinkler);
        assert_eq!(m.unit, "distance");
        assert!((m.value - 0.038_888_888_888_888_86).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_flag() {
        let m = measure(&compare_args(&["MARTHA", "MARHTA", "--similarity"])).unwrap();
        assert_eq!(m.unit, "similarity");
        assert!((m.value - 0.961_111_111_111_111_1).abs() < 1e-9);
    }

    #[test]
    fn test_damerau_reports_edits() {
        let m = measure(&compare_args(&["kitten", "sitting", "--metric", "dl"])).unwrap();
        assert_eq!(m.metric, MetricKind::DamerauLevenshtein);
        assert_eq!(m.unit, "edits");
        assert_eq!(m.value, 3.0);

        let m = measure(&compare_args(&["hello", "hallo", "-m", "dl", "-s"])).unwrap();
        assert_eq!(m.unit, "similarity");
        assert!((m.value - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_arguments_are_errors() {
        assert!(measure(&compare_args(&["a", "b", "--weight-threshold", "1.5"])).is_err());
        assert!(measure(&compare_args(&["a", "b", "--metric", "soundex"])).is_err());
        assert!(measure(&compare_args(&["a", "b", "--normalize", "upper"])).is_err());

        let long = "a".repeat(textmetrics::MAX_QUADRATIC_LENGTH + 1);
        assert!(measure(&compare_args(&[long.as_str(), "b", "--metric", "dl"])).is_err());
    }

    #[test]
    fn test_measurement_json() {
        let m = measure(&compare_args(&["kitten", "kittne", "-m", "dl"])).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"metric": "damerau_levenshtein", "unit": "edits", "value": 1.0})
        );
    }
}
