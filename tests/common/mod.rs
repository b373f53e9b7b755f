//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// x = 0..n, y alternating 0/1 starting at 0
pub fn alternating_samples(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x = (0..n).map(|i| i as f64).collect();
    let y = (0..n).map(|i| (i % 2) as f64).collect();
    (x, y)
}

/// Two tight clusters at the ends of the range, so interior bins stay empty
pub fn clustered_samples() -> (Vec<f64>, Vec<f64>) {
    let mut x = vec![0.0; 20];
    x.extend(vec![10.0; 20]);
    let mut y = vec![1.0; 20];
    y.extend(vec![0.5; 20]);
    (x, y)
}

/// Noisy step function: event rate 0.2 below 50, 0.8 above
pub fn random_step_samples(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let x: Vec<f64> = (0..n).map(|_| rng.gen::<f64>() * 100.0).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&v| {
            let rate = if v < 50.0 { 0.2 } else { 0.8 };
            if rng.gen::<f64>() < rate {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    (x, y)
}

/// Create a simple test DataFrame with known characteristics for testing
///
/// This DataFrame includes:
/// - `target`: Binary target column (0/1)
/// - `feature_good`: Clean numeric feature
/// - `feature_missing`: Nulls in two rows
/// - `feature_constant`: Zero variance (cannot be binned)
/// - `label`: String column (not a predictor)
pub fn create_test_dataframe() -> DataFrame {
    df! {
        "target" => [0i32, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        "feature_good" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "feature_missing" => [Some(1.0f64), None, Some(3.0), Some(4.0), Some(5.0), Some(6.0), None, Some(8.0), Some(9.0), Some(10.0)],
        "feature_constant" => [5.0f64; 10],
        "label" => ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
