//! Tests for fit summaries and the JSON binning report

use optibin::pipeline::{fit_features, BatchResult, BinningConfig};
use optibin::report::{build_binning_report, export_binning_report, ExportParams, FitSummary};
use tempfile::TempDir;

mod common;

fn fitted_batch() -> BatchResult {
    let df = common::create_test_dataframe();
    let features: Vec<String> = ["feature_good", "feature_missing", "feature_constant"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    fit_features(&df, &features, "target", &BinningConfig::default(), false).unwrap()
}

fn params(config: BinningConfig) -> ExportParams<'static> {
    ExportParams {
        input_file: "data.csv",
        target_column: "target",
        config,
    }
}

#[test]
fn test_build_report_summary() {
    let batch = fitted_batch();
    let report = build_binning_report(&batch, &params(BinningConfig::default()));

    assert_eq!(report.summary.features_fitted, 2);
    assert_eq!(report.summary.features_failed, 1);
    assert_eq!(report.failures[0].feature, "feature_constant");

    let expected_avg = batch
        .fits
        .iter()
        .map(|f| f.fitted.bin_count as f64)
        .sum::<f64>()
        / 2.0;
    assert!((report.summary.avg_bin_count - expected_avg).abs() < 1e-12);
}

#[test]
fn test_report_bins_cover_fitted_state() {
    let batch = fitted_batch();
    let report = build_binning_report(&batch, &params(BinningConfig::default()));

    for (feature, fit) in report.features.iter().zip(&batch.fits) {
        assert_eq!(feature.bins.len(), fit.fitted.bin_count);
        assert_eq!(feature.bins[0].lower, fit.fitted.edges[0]);
        assert_eq!(
            feature.bins.last().unwrap().upper,
            *fit.fitted.edges.last().unwrap()
        );
        let total: usize = feature.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, feature.samples);
    }
}

#[test]
fn test_export_report_json() {
    let batch = fitted_batch();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.json");

    export_binning_report(&batch, &path, &params(BinningConfig::with_max_bins(30))).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(json["metadata"]["input_file"], "data.csv");
    assert_eq!(json["metadata"]["target_column"], "target");
    assert_eq!(json["metadata"]["config"]["max_bins"], 30);
    assert_eq!(json["metadata"]["config"]["criterion"]["name"], "knuth");
    assert!(json["metadata"]["timestamp"].is_string());
    assert_eq!(json["features"].as_array().unwrap().len(), 2);
    assert!(json["features"][0]["bins"][0]["mean"].is_number());
    assert_eq!(json["failures"].as_array().unwrap().len(), 1);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let batch = fitted_batch();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("report.json");

    assert!(export_binning_report(&batch, &path, &params(BinningConfig::default())).is_err());
}

#[test]
fn test_fit_summary_rows() {
    let batch = fitted_batch();
    let summary = FitSummary::from_batch(&batch);

    assert_eq!(summary.rows.len(), 2);
    assert_eq!(summary.failures.len(), 1);

    let good = &summary.rows[0];
    assert_eq!(good.feature, "feature_good");
    assert_eq!(good.samples, 10);
    assert!(good.mean_range.0 <= good.mean_range.1);
    assert!(good.mean_range.0 >= 0.0 && good.mean_range.1 <= 1.0);

    let rendered = summary.table().to_string();
    assert!(rendered.contains("feature_good"));
    assert!(rendered.contains("feature_missing"));
}
