//! Histogram log-likelihoods used to score candidate bin counts
//!
//! - Knuth (2006): marginal posterior of a piecewise-constant density with a
//!   Jeffreys prior on bin probabilities.
//! - Hogg (2008): leave-one-out style likelihood with a pseudo-count `a`
//!   added to every bin.

use statrs::function::gamma::ln_gamma;

use super::config::LikelihoodCriterion;
use super::histogram::Histogram;

/// Knuth log-likelihood of per-bin counts.
///
/// `L(m) = N ln m + lnΓ(m/2) − lnΓ(N + m/2) − m lnΓ(1/2) + Σ lnΓ(n_i + 1/2)`
pub fn knuth_log_likelihood(counts: &[usize]) -> f64 {
    let m = counts.len() as f64;
    let n = counts.iter().sum::<usize>() as f64;

    let prior = n * m.ln() + ln_gamma(m / 2.0) - ln_gamma(n + m / 2.0);
    let data = -m * ln_gamma(0.5)
        + counts
            .iter()
            .map(|&c| ln_gamma(c as f64 + 0.5))
            .sum::<f64>();

    prior + data
}

/// Hogg log-likelihood of per-bin counts with bin width `width`.
///
/// `L = Σ n_i ln((n_i + a − 1) / (d (s − 1)))` with `s = Σ (n_i + a)`.
/// Empty bins contribute nothing.
pub fn hogg_log_likelihood(counts: &[usize], width: f64, smoothing: f64) -> f64 {
    let s: f64 = counts.iter().map(|&c| c as f64 + smoothing).sum();
    let denom = width * (s - 1.0);

    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let c = c as f64;
            c * ((c + smoothing - 1.0) / denom).ln()
        })
        .sum()
}

impl LikelihoodCriterion {
    /// Score a histogram under this criterion
    pub fn score(&self, histogram: &Histogram) -> f64 {
        match *self {
            LikelihoodCriterion::Knuth => knuth_log_likelihood(&histogram.counts),
            LikelihoodCriterion::Hogg { smoothing } => {
                hogg_log_likelihood(&histogram.counts, histogram.width(), smoothing)
            }
        }
    }
}
