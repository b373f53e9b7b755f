//! Optimal-bin regression estimator
//!
//! `fit` selects a bin count from the predictor alone, builds equal-width
//! edges at that count and stores the mean target per bin. `transform` maps
//! new predictor values onto the stored bins.

use serde::Serialize;

use super::config::BinningConfig;
use super::error::BinningError;
use super::histogram::{bin_index, edges_are_usable, equal_width_edges, value_range};
use super::selector::{select_bin_count, BinSelection};

/// Two-stage estimator contract: learn state from (x, y), then apply it to x.
pub trait Transformer {
    type Error;

    /// Learn state from paired samples, replacing any previous state.
    fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<&mut Self, Self::Error>;

    /// Apply learned state, producing one output per input in order.
    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, Self::Error>;

    /// `fit` followed by `transform` on the same predictor values.
    fn fit_transform(&mut self, x: &[f64], y: &[f64]) -> Result<Vec<f64>, Self::Error> {
        self.fit(x, y)?;
        self.transform(x)
    }
}

/// A single fitted bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinSummary {
    /// Lower bound (inclusive during fit)
    pub lower: f64,
    /// Upper bound (exclusive during fit, except for the last bin)
    pub upper: f64,
    /// Fitting samples that fell in this bin
    pub count: usize,
    /// Mean target of those samples, 0 when the bin is empty
    pub mean: f64,
}

/// State produced by one successful fit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedBins {
    /// Chosen bin count
    pub bin_count: usize,
    /// `bin_count + 1` strictly increasing edges
    pub edges: Vec<f64>,
    /// Mean target per bin
    pub means: Vec<f64>,
    /// Fitting samples per bin
    pub counts: Vec<usize>,
    /// Likelihood of the chosen bin count
    pub score: f64,
}

impl FittedBins {
    /// Build edges and per-bin target means at the selected bin count.
    fn build(x: &[f64], y: &[f64], selection: &BinSelection) -> Result<Self, BinningError> {
        let bin_count = selection.bin_count;
        let (lo, hi) = value_range(x)
            .ok_or_else(|| BinningError::InvalidInput("predictor has no values".to_string()))?;

        let edges = equal_width_edges(lo, hi, bin_count);
        if !edges_are_usable(&edges) {
            return Err(BinningError::InvalidInput(format!(
                "cannot place {} distinct edges over [{}, {}]",
                bin_count + 1,
                lo,
                hi
            )));
        }

        let mut sums = vec![0.0f64; bin_count];
        let mut counts = vec![0usize; bin_count];
        for (&xi, &yi) in x.iter().zip(y) {
            if let Some(idx) = bin_index(xi, &edges) {
                sums[idx] += yi;
                counts[idx] += 1;
            }
        }

        let means = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| if count > 0 { sum / count as f64 } else { 0.0 })
            .collect();

        Ok(Self {
            bin_count,
            edges,
            means,
            counts,
            score: selection.score,
        })
    }

    /// Bin for a new value under right-inclusive lookup.
    ///
    /// A value on an interior edge belongs to the bin on its left. The lookup
    /// index equals `bin_count` only above the last edge and is pulled back
    /// into the last bin; anything at or below the first upper edge lands in
    /// bin 0. Returns `None` for NaN.
    pub fn lookup_bin(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let idx = self.edges[1..].partition_point(|&edge| edge < value);
        if idx == self.bin_count {
            Some(idx - 1)
        } else {
            Some(idx)
        }
    }

    /// Predicted value for a new predictor value
    pub fn predict(&self, value: f64) -> f64 {
        self.lookup_bin(value)
            .map(|idx| self.means[idx])
            .unwrap_or(f64::NAN)
    }

    /// Number of bins that received no fitting samples
    pub fn empty_bins(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }

    /// Per-bin bounds, counts and means
    pub fn bins(&self) -> Vec<BinSummary> {
        (0..self.bin_count)
            .map(|i| BinSummary {
                lower: self.edges[i],
                upper: self.edges[i + 1],
                count: self.counts[i],
                mean: self.means[i],
            })
            .collect()
    }
}

/// Piecewise-constant regression on likelihood-optimal histogram bins
#[derive(Debug, Clone, Default)]
pub struct OptimalBin {
    config: BinningConfig,
    state: Option<FittedBins>,
}

impl OptimalBin {
    pub fn new(config: BinningConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Default configuration with a custom upper bound on the bin count sweep
    pub fn with_max_bins(max_bins: usize) -> Self {
        Self::new(BinningConfig::with_max_bins(max_bins))
    }

    pub fn config(&self) -> &BinningConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fitted state, `None` before the first successful fit
    pub fn fitted(&self) -> Option<&FittedBins> {
        self.state.as_ref()
    }

    pub fn bin_count(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.bin_count)
    }

    pub fn bin_edges(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.edges.as_slice())
    }

    pub fn bin_means(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.means.as_slice())
    }

    pub fn bin_counts(&self) -> Option<&[usize]> {
        self.state.as_ref().map(|s| s.counts.as_slice())
    }
}

/// Reject sample sets that cannot be binned
fn validate_samples(x: &[f64], y: &[f64]) -> Result<(), BinningError> {
    if x.len() != y.len() {
        return Err(BinningError::InvalidInput(format!(
            "x and y must have the same length (x: {}, y: {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(BinningError::InvalidInput(format!(
            "at least 2 samples are required, got {}",
            x.len()
        )));
    }
    if let Some(pos) = x.iter().position(|v| !v.is_finite()) {
        return Err(BinningError::InvalidInput(format!(
            "x contains a non-finite value at index {}",
            pos
        )));
    }
    if let Some(pos) = y.iter().position(|v| !v.is_finite()) {
        return Err(BinningError::InvalidInput(format!(
            "y contains a non-finite value at index {}",
            pos
        )));
    }
    Ok(())
}

impl Transformer for OptimalBin {
    type Error = BinningError;

    fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<&mut Self, BinningError> {
        self.config.validate()?;
        validate_samples(x, y)?;

        let selection = select_bin_count(x, &self.config)?;
        let state = FittedBins::build(x, y, &selection)?;

        self.state = Some(state);
        Ok(self)
    }

    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, BinningError> {
        let state = self.state.as_ref().ok_or(BinningError::NotFitted)?;
        Ok(x.iter().map(|&v| state.predict(v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(edges: Vec<f64>, means: Vec<f64>) -> FittedBins {
        let bin_count = means.len();
        FittedBins {
            bin_count,
            edges,
            counts: vec![1; bin_count],
            means,
            score: 0.0,
        }
    }

    #[test]
    fn test_lookup_every_edge() {
        let state = fitted(vec![0.0, 1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]);
        // First edge and below: bin 0
        assert_eq!(state.lookup_bin(-5.0), Some(0));
        assert_eq!(state.lookup_bin(0.0), Some(0));
        // Interior edges go left
        assert_eq!(state.lookup_bin(1.0), Some(0));
        assert_eq!(state.lookup_bin(2.0), Some(1));
        // Last edge stays in the last bin
        assert_eq!(state.lookup_bin(3.0), Some(2));
        // Above the range clamps into the last bin
        assert_eq!(state.lookup_bin(99.0), Some(2));
    }

    #[test]
    fn test_lookup_interiors() {
        let state = fitted(vec![0.0, 1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]);
        assert_eq!(state.lookup_bin(0.5), Some(0));
        assert_eq!(state.lookup_bin(1.000001), Some(1));
        assert_eq!(state.lookup_bin(2.5), Some(2));
    }

    #[test]
    fn test_lookup_infinities_and_nan() {
        let state = fitted(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]);
        assert_eq!(state.lookup_bin(f64::NEG_INFINITY), Some(0));
        assert_eq!(state.lookup_bin(f64::INFINITY), Some(1));
        assert_eq!(state.lookup_bin(f64::NAN), None);
        assert!(state.predict(f64::NAN).is_nan());
    }

    #[test]
    fn test_build_empty_bin_mean_is_zero() {
        let x = [0.0, 1.0, 9.0, 10.0];
        let y = [1.0, 1.0, 0.5, 0.5];
        let selection = BinSelection {
            bin_count: 3,
            score: 0.0,
            candidates: Vec::new(),
        };
        let state = FittedBins::build(&x, &y, &selection).unwrap();
        assert_eq!(state.edges.len(), 4);
        assert_eq!(state.counts, vec![2, 0, 2]);
        assert_eq!(state.means, vec![1.0, 0.0, 0.5]);
        assert_eq!(state.empty_bins(), 1);
    }

    #[test]
    fn test_bins_summary() {
        let state = fitted(vec![0.0, 1.0, 2.0], vec![0.25, 0.75]);
        let bins = state.bins();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[1].lower, 1.0);
        assert_eq!(bins[1].upper, 2.0);
        assert_eq!(bins[1].mean, 0.75);
    }

    #[test]
    fn test_validate_samples() {
        assert!(validate_samples(&[1.0, 2.0], &[0.0, 1.0]).is_ok());
        assert!(validate_samples(&[1.0, 2.0], &[0.0]).is_err());
        assert!(validate_samples(&[1.0], &[0.0]).is_err());
        assert!(validate_samples(&[1.0, f64::NAN], &[0.0, 1.0]).is_err());
        assert!(validate_samples(&[1.0, 2.0], &[0.0, f64::INFINITY]).is_err());
    }
}
