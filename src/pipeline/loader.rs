//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Paired predictor/target values usable for fitting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairedSamples {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Rows dropped because x or y was null or non-finite
    pub skipped: usize,
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn scan_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match file_extension(path).as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            other
        ),
    };

    Ok(lf)
}

/// Load a dataset from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    scan_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Estimated in-memory size of a frame in megabytes
pub fn estimated_memory_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}

/// Numeric (or boolean) column cast to f64, nulls preserved
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;

    let dtype = col.dtype();
    if !(dtype.is_primitive_numeric() || matches!(dtype, DataType::Boolean)) {
        anyhow::bail!("Column '{}' is not numeric (found {})", name, dtype);
    }

    let float_col = col.cast(&DataType::Float64)?;
    let values = float_col.f64()?.into_iter().collect();
    Ok(values)
}

/// Names of every numeric column except `target`
pub fn numeric_feature_columns(df: &DataFrame, target: &str) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric() && col.name() != target)
        .map(|col| col.name().to_string())
        .collect()
}

/// Zip predictor and target values, skipping rows where either is null.
///
/// NaN and infinite cells (e.g. a literal `NaN` in a CSV) count as missing.
pub fn pair_samples(x: &[Option<f64>], y: &[Option<f64>]) -> PairedSamples {
    let mut samples = PairedSamples::default();
    for (xi, yi) in x.iter().zip(y) {
        match (xi, yi) {
            (Some(xv), Some(yv)) if xv.is_finite() && yv.is_finite() => {
                samples.x.push(*xv);
                samples.y.push(*yv);
            }
            _ => samples.skipped += 1,
        }
    }
    samples
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    match file_extension(path).as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        other => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            other
        ),
    }

    Ok(())
}
