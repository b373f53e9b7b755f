//! Estimator configuration: sweep bounds and likelihood criterion

use serde::Serialize;

use super::error::BinningError;

/// Default upper bound on candidate bin counts
pub const DEFAULT_MAX_BINS: usize = 100;

/// Default number of evenly spaced points in the candidate sweep
pub const DEFAULT_SWEEP_POINTS: usize = 50;

/// Default smoothing constant for the Hogg likelihood
pub const DEFAULT_HOGG_SMOOTHING: f64 = 10.0;

/// Likelihood used to score candidate bin counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum LikelihoodCriterion {
    /// Knuth (2006) Bayesian histogram likelihood (default)
    #[default]
    Knuth,
    /// Hogg (2008) smoothed-count likelihood
    Hogg {
        /// Pseudo-count added to every bin
        smoothing: f64,
    },
}

impl LikelihoodCriterion {
    /// Hogg criterion with the default smoothing constant
    pub fn hogg() -> Self {
        LikelihoodCriterion::Hogg {
            smoothing: DEFAULT_HOGG_SMOOTHING,
        }
    }
}

impl std::fmt::Display for LikelihoodCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LikelihoodCriterion::Knuth => write!(f, "knuth"),
            LikelihoodCriterion::Hogg { smoothing } => write!(f, "hogg(a={})", smoothing),
        }
    }
}

impl std::str::FromStr for LikelihoodCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knuth" => Ok(LikelihoodCriterion::Knuth),
            "hogg" => Ok(LikelihoodCriterion::hogg()),
            _ => Err(format!(
                "Unknown likelihood criterion: '{}'. Use 'knuth' or 'hogg'.",
                s
            )),
        }
    }
}

/// Configuration for [`OptimalBin`](super::OptimalBin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinningConfig {
    /// Upper bound of the candidate bin count sweep (inclusive, >= 2)
    pub max_bins: usize,
    /// Number of evenly spaced candidates between 2 and `max_bins`
    pub sweep_points: usize,
    /// Score maximized over the sweep
    pub criterion: LikelihoodCriterion,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            max_bins: DEFAULT_MAX_BINS,
            sweep_points: DEFAULT_SWEEP_POINTS,
            criterion: LikelihoodCriterion::Knuth,
        }
    }
}

impl BinningConfig {
    /// Default configuration with a custom `max_bins`
    pub fn with_max_bins(max_bins: usize) -> Self {
        Self {
            max_bins,
            ..Default::default()
        }
    }

    /// Check every field against its valid domain
    pub fn validate(&self) -> Result<(), BinningError> {
        if self.max_bins < 2 {
            return Err(BinningError::InvalidConfig(format!(
                "max_bins must be at least 2, got {}",
                self.max_bins
            )));
        }
        if self.sweep_points == 0 {
            return Err(BinningError::InvalidConfig(
                "sweep_points must be at least 1".to_string(),
            ));
        }
        if let LikelihoodCriterion::Hogg { smoothing } = self.criterion {
            if !smoothing.is_finite() || smoothing <= 0.0 {
                return Err(BinningError::InvalidConfig(format!(
                    "Hogg smoothing must be a positive finite number, got {}",
                    smoothing
                )));
            }
        }
        Ok(())
    }
}
