//! Tests for per-column batch fitting

use optibin::pipeline::{
    add_prediction_columns, fit_feature, fit_features, numeric_column, BinningConfig,
    OptimalBin, Transformer,
};
use polars::prelude::*;

mod common;

fn features(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_fit_features_collects_failures() {
    let df = common::create_test_dataframe();
    let config = BinningConfig::default();

    let batch = fit_features(
        &df,
        &features(&["feature_good", "feature_constant", "feature_missing"]),
        "target",
        &config,
        false,
    )
    .unwrap();

    let fitted: Vec<&str> = batch.fits.iter().map(|f| f.feature.as_str()).collect();
    assert_eq!(fitted, vec!["feature_good", "feature_missing"]);

    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].feature, "feature_constant");
    assert!(
        batch.failures[0].error.contains("Degenerate"),
        "unexpected error: {}",
        batch.failures[0].error
    );
}

#[test]
fn test_fit_feature_matches_direct_model() {
    let df = common::create_test_dataframe();
    let target = numeric_column(&df, "target").unwrap();
    let config = BinningConfig::default();

    let fit = fit_feature(&df, "feature_good", &target, &config).unwrap();

    let x: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..10).map(|i| (i % 2) as f64).collect();
    let mut model = OptimalBin::new(config);
    let expected = model.fit_transform(&x, &y).unwrap();

    assert_eq!(fit.samples, 10);
    assert_eq!(fit.skipped, 0);
    assert_eq!(Some(&fit.fitted), model.fitted());
    let predictions: Vec<f64> = fit.predictions.iter().map(|p| p.unwrap()).collect();
    assert_eq!(predictions, expected);
}

#[test]
fn test_predictions_aligned_with_nulls() {
    let df = common::create_test_dataframe();
    let target = numeric_column(&df, "target").unwrap();

    let fit = fit_feature(&df, "feature_missing", &target, &BinningConfig::default()).unwrap();

    assert_eq!(fit.samples, 8);
    assert_eq!(fit.skipped, 2);
    assert_eq!(fit.predictions.len(), df.height());
    assert!(fit.predictions[1].is_none());
    assert!(fit.predictions[6].is_none());
    assert!(fit.predictions[0].is_some());
}

#[test]
fn test_null_target_rows_are_skipped_but_predicted() {
    let df = df! {
        "target" => [Some(0.0f64), Some(1.0), None, Some(1.0), Some(0.0), Some(1.0)],
        "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
    }
    .unwrap();

    let batch = fit_features(&df, &features(&["x"]), "target", &BinningConfig::default(), false).unwrap();
    let fit = &batch.fits[0];

    assert_eq!(fit.samples, 5);
    assert_eq!(fit.skipped, 1);
    assert!(fit.predictions.iter().all(|p| p.is_some()));
}

#[test]
fn test_invalid_target_is_fatal() {
    let df = common::create_test_dataframe();
    let result = fit_features(
        &df,
        &features(&["feature_good"]),
        "label",
        &BinningConfig::default(),
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_empty_feature_list() {
    let df = common::create_test_dataframe();
    let batch = fit_features(&df, &[], "target", &BinningConfig::default(), false).unwrap();
    assert!(batch.fits.is_empty());
    assert!(batch.failures.is_empty());
}

#[test]
fn test_add_prediction_columns() {
    let mut df = common::create_test_dataframe();
    let batch = fit_features(
        &df,
        &features(&["feature_good", "feature_missing"]),
        "target",
        &BinningConfig::default(),
        false,
    )
    .unwrap();

    add_prediction_columns(&mut df, &batch.fits).unwrap();

    common::assert_has_columns(&df, &["feature_good_binned", "feature_missing_binned"]);
    let binned = df.column("feature_missing_binned").unwrap();
    assert_eq!(binned.null_count(), 2);
    assert_eq!(binned.dtype(), &DataType::Float64);
}
