//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::pipeline::{BinningConfig, LikelihoodCriterion};

/// Optibin - Likelihood-optimal binning regression of a target against numeric predictors
#[derive(Parser, Debug)]
#[command(name = "optibin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column name (binary 0/1 or real-valued)
    #[arg(short, long)]
    pub target: String,

    /// Predictor columns to bin (comma-separated).
    /// Defaults to every numeric column except the target.
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Output file path for the dataset with '<feature>_binned' prediction columns
    /// (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_binned' suffix (e.g., data.csv -> data_binned.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON report path for the fitted bins.
    /// Defaults to input directory with '_binning.json' suffix.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip writing the JSON report
    #[arg(long, default_value = "false")]
    pub no_report: bool,

    /// Upper bound of the candidate bin count sweep (at least 2)
    #[arg(long, default_value = "100", value_parser = validate_max_bins)]
    pub max_bins: usize,

    /// Number of evenly spaced candidate bin counts between 2 and --max-bins
    #[arg(long, default_value = "50", value_parser = validate_sweep_points)]
    pub sweep_points: usize,

    /// Likelihood maximized over the sweep.
    /// Options: "knuth" (default) or "hogg"
    #[arg(long, default_value = "knuth")]
    pub criterion: LikelihoodCriterion,

    /// Pseudo-count added to every bin by the Hogg likelihood.
    /// Only applies when --criterion hogg is selected.
    #[arg(long, default_value = "10.0", value_parser = validate_hogg_smoothing)]
    pub hogg_smoothing: f64,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Suppress banner, step output and progress bars
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Get the output path, deriving from input if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let extension = self
                .input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("parquet");
            sibling_path(&self.input, &format!("_binned.{}", extension))
        })
    }

    /// Get the JSON report path, `None` when reporting is disabled.
    pub fn report_path(&self) -> Option<PathBuf> {
        if self.no_report {
            return None;
        }
        Some(
            self.report
                .clone()
                .unwrap_or_else(|| sibling_path(&self.input, "_binning.json")),
        )
    }

    /// Estimator configuration assembled from the flags
    pub fn binning_config(&self) -> BinningConfig {
        let criterion = match self.criterion {
            LikelihoodCriterion::Hogg { .. } => LikelihoodCriterion::Hogg {
                smoothing: self.hogg_smoothing,
            },
            other => other,
        };
        BinningConfig {
            max_bins: self.max_bins,
            sweep_points: self.sweep_points,
            criterion,
        }
    }
}

/// `<input dir>/<input stem><suffix>`
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}{}", stem, suffix))
}

/// Validator for max_bins parameter
fn validate_max_bins(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid bin count", s))?;

    if value < 2 {
        Err(format!("max_bins must be at least 2, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for sweep_points parameter
fn validate_sweep_points(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of points", s))?;

    if value == 0 {
        Err("sweep_points must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for hogg_smoothing parameter
fn validate_hogg_smoothing(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value <= 0.0 {
        Err(format!(
            "hogg_smoothing must be a positive number, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
