//! Likelihood-optimal bin count selection
//!
//! Candidate bin counts are swept over `[2, max_bins]`, each candidate is
//! histogrammed and scored, and the first maximal score wins. Candidates whose
//! edges cannot be represented as distinct finite floats are skipped.

use serde::Serialize;

use super::config::BinningConfig;
use super::error::BinningError;
use super::histogram::{edges_are_usable, equal_width_edges, value_range, Histogram};

/// Score of a single candidate bin count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScore {
    pub bin_count: usize,
    pub score: f64,
}

/// Outcome of the sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinSelection {
    /// Winning bin count
    pub bin_count: usize,
    /// Likelihood at the winning bin count
    pub score: f64,
    /// Every evaluated candidate in sweep order, excluding skipped ones
    pub candidates: Vec<CandidateScore>,
}

/// Candidate bin counts: `sweep_points` evenly spaced values over
/// `[2, max_bins]`, truncated to integers.
///
/// Truncation can repeat a count when the range is narrower than the number
/// of points; repeats are kept so sweep order is preserved.
pub fn candidate_bin_counts(max_bins: usize, sweep_points: usize) -> Vec<usize> {
    const START: usize = 2;

    if sweep_points <= 1 {
        return vec![START];
    }

    let span = max_bins.saturating_sub(START) as f64;
    let step = span / (sweep_points - 1) as f64;
    (0..sweep_points)
        .map(|i| {
            if i == sweep_points - 1 {
                max_bins.max(START)
            } else {
                (START as f64 + i as f64 * step) as usize
            }
        })
        .collect()
}

/// Select the bin count maximizing the configured likelihood of `x`.
///
/// Ties go to the earliest candidate in sweep order.
pub fn select_bin_count(x: &[f64], config: &BinningConfig) -> Result<BinSelection, BinningError> {
    config.validate()?;

    let range = value_range(x)
        .ok_or_else(|| BinningError::InvalidInput("predictor has no values".to_string()))?;
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(BinningError::InvalidInput(
            "predictor contains non-finite values".to_string(),
        ));
    }
    if range.0 == range.1 {
        return Err(BinningError::DegenerateInput { value: range.0 });
    }
    if !(range.1 - range.0).is_finite() {
        return Err(BinningError::InvalidInput(format!(
            "predictor range [{}, {}] overflows f64",
            range.0, range.1
        )));
    }

    let candidates: Vec<CandidateScore> = candidate_bin_counts(config.max_bins, config.sweep_points)
        .into_iter()
        .filter_map(|bin_count| {
            let edges = equal_width_edges(range.0, range.1, bin_count);
            if !edges_are_usable(&edges) {
                return None;
            }
            let histogram = Histogram::from_edges(x, edges);
            Some(CandidateScore {
                bin_count,
                score: config.criterion.score(&histogram),
            })
        })
        .collect();

    let Some(&first) = candidates.first() else {
        return Err(BinningError::InvalidInput(format!(
            "predictor range [{}, {}] is too narrow to split into bins",
            range.0, range.1
        )));
    };

    let mut best = first;
    for candidate in &candidates[1..] {
        if rank(candidate.score) > rank(best.score) {
            best = *candidate;
        }
    }

    Ok(BinSelection {
        bin_count: best.bin_count,
        score: best.score,
        candidates,
    })
}

/// NaN never wins
fn rank(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}
