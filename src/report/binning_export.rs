//! JSON export of fitted bins
//!
//! The report is for inspection only; nothing reads it back into a model.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{BatchResult, BinSummary, BinningConfig, FeatureFailure};

/// Metadata about the binning run
#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub optibin_version: String,
    pub input_file: String,
    pub target_column: String,
    /// Estimator configuration shared by every feature
    pub config: BinningConfig,
}

/// Summary statistics of the run
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub features_fitted: usize,
    pub features_failed: usize,
    /// Average chosen bin count across fitted features
    pub avg_bin_count: f64,
}

/// Fitted bins of a single predictor
#[derive(Debug, Serialize)]
pub struct FeatureReport {
    pub feature: String,
    pub samples: usize,
    pub skipped: usize,
    pub bin_count: usize,
    pub empty_bins: usize,
    /// Likelihood of the chosen bin count
    pub score: f64,
    pub bins: Vec<BinSummary>,
}

/// Complete binning report with metadata
#[derive(Debug, Serialize)]
pub struct BinningReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub features: Vec<FeatureReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FeatureFailure>,
}

/// Parameters for report metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub config: BinningConfig,
}

/// Assemble the report for a finished batch
pub fn build_binning_report(batch: &BatchResult, params: &ExportParams) -> BinningReport {
    let features: Vec<FeatureReport> = batch
        .fits
        .iter()
        .map(|fit| FeatureReport {
            feature: fit.feature.clone(),
            samples: fit.samples,
            skipped: fit.skipped,
            bin_count: fit.fitted.bin_count,
            empty_bins: fit.fitted.empty_bins(),
            score: fit.fitted.score,
            bins: fit.fitted.bins(),
        })
        .collect();

    let avg_bin_count = if features.is_empty() {
        0.0
    } else {
        features.iter().map(|f| f.bin_count as f64).sum::<f64>() / features.len() as f64
    };

    BinningReport {
        metadata: ReportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            optibin_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            target_column: params.target_column.to_string(),
            config: params.config,
        },
        summary: ReportSummary {
            features_fitted: features.len(),
            features_failed: batch.failures.len(),
            avg_bin_count,
        },
        features,
        failures: batch.failures.clone(),
    }
}

/// Export the binning report to a JSON file
///
/// # Arguments
/// * `batch` - Fitted features and failures
/// * `output_path` - Path to write the JSON file
/// * `params` - Export parameters for metadata
pub fn export_binning_report(
    batch: &BatchResult,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let report = build_binning_report(batch, params);

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize binning report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write binning report to {}", output_path.display()))?;

    Ok(())
}
