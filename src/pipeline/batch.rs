//! Fit one independent binning model per predictor column
//!
//! Each column gets its own `OptimalBin`, so columns are fitted in parallel
//! without any shared mutable state.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use super::config::BinningConfig;
use super::loader::{numeric_column, pair_samples};
use super::model::{FittedBins, OptimalBin, Transformer};

/// Suffix appended to a predictor name for its prediction column
pub const PREDICTION_SUFFIX: &str = "_binned";

/// Fitted model for one predictor column
#[derive(Debug, Clone)]
pub struct FeatureFit {
    pub feature: String,
    /// Rows used for fitting
    pub samples: usize,
    /// Rows skipped because the predictor or target was null
    pub skipped: usize,
    pub fitted: FittedBins,
    /// One prediction per frame row, null where the predictor is null
    pub predictions: Vec<Option<f64>>,
}

impl FeatureFit {
    pub fn prediction_column_name(&self) -> String {
        format!("{}{}", self.feature, PREDICTION_SUFFIX)
    }
}

/// A predictor column that could not be fitted
#[derive(Debug, Clone, Serialize)]
pub struct FeatureFailure {
    pub feature: String,
    pub error: String,
}

/// Outcome of fitting every requested predictor
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Successful fits, in the requested column order
    pub fits: Vec<FeatureFit>,
    pub failures: Vec<FeatureFailure>,
}

/// Fit a single predictor column against pre-extracted target values
pub fn fit_feature(
    df: &DataFrame,
    feature: &str,
    target_values: &[Option<f64>],
    config: &BinningConfig,
) -> Result<FeatureFit> {
    let x = numeric_column(df, feature)?;
    let samples = pair_samples(&x, target_values);

    let mut model = OptimalBin::new(*config);
    model
        .fit(&samples.x, &samples.y)
        .with_context(|| format!("Failed to fit feature '{}'", feature))?;

    let fitted = model
        .fitted()
        .cloned()
        .context("Model reported success without fitted state")?;

    // Predictions need only the predictor, so rows with a null target still get one
    let predictions = x
        .iter()
        .map(|value| value.map(|v| fitted.predict(v)))
        .collect();

    Ok(FeatureFit {
        feature: feature.to_string(),
        samples: samples.x.len(),
        skipped: samples.skipped,
        fitted,
        predictions,
    })
}

/// Fit every predictor in `features` against `target`, in parallel.
///
/// Per-feature failures are collected rather than aborting the batch; only a
/// missing or non-numeric target is fatal.
pub fn fit_features(
    df: &DataFrame,
    features: &[String],
    target: &str,
    config: &BinningConfig,
    show_progress: bool,
) -> Result<BatchResult> {
    config.validate()?;

    let target_values = numeric_column(df, target)
        .with_context(|| format!("Invalid target column '{}'", target))?;

    if features.is_empty() {
        return Ok(BatchResult::default());
    }

    let total = features.len() as u64;
    let pb = if show_progress {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "   Fitting bins [{bar:40.cyan/blue}] {pos}/{len} features ({percent}%) [{eta}]",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let progress_counter = AtomicU64::new(0);

    let results: Vec<(String, Result<FeatureFit>)> = features
        .par_iter()
        .map(|feature| {
            let result = fit_feature(df, feature, &target_values, config);

            let count = progress_counter.fetch_add(1, Ordering::Relaxed);
            pb.set_position(count + 1);

            (feature.clone(), result)
        })
        .collect();

    let mut batch = BatchResult::default();
    for (feature, result) in results {
        match result {
            Ok(fit) => batch.fits.push(fit),
            Err(e) => batch.failures.push(FeatureFailure {
                feature,
                error: format!("{:#}", e),
            }),
        }
    }

    pb.finish_with_message(format!(
        "   [OK] Fitted {} of {} features",
        batch.fits.len(),
        features.len()
    ));

    Ok(batch)
}

/// Append one `<feature>_binned` prediction column per fit
pub fn add_prediction_columns(df: &mut DataFrame, fits: &[FeatureFit]) -> Result<()> {
    for fit in fits {
        let name = fit.prediction_column_name();
        df.with_column(Column::new(name.as_str().into(), fit.predictions.clone()))
            .with_context(|| format!("Failed to add prediction column '{}'", name))?;
    }
    Ok(())
}
