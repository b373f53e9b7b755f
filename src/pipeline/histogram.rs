//! Equal-width histogram primitives
//!
//! Bins are left-inclusive and right-exclusive, except the last bin which is
//! closed on both ends so that the maximum value is counted.

/// Minimum and maximum of a slice, or `None` when it is empty.
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// `bins + 1` evenly spaced edges from `lo` to `hi`; the last edge is exactly `hi`.
pub fn equal_width_edges(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let step = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * step).collect();
    edges[bins] = hi;
    edges
}

/// Finite and strictly increasing, so every bin has a positive width
pub fn edges_are_usable(edges: &[f64]) -> bool {
    edges.iter().all(|e| e.is_finite()) && edges.windows(2).all(|w| w[0] < w[1])
}

/// Bin of `value` under the histogram convention, `None` outside `[edges[0], edges[last]]`.
///
/// The arithmetic guess is corrected against the materialized edges so that
/// assignment always agrees with the stored boundaries.
pub fn bin_index(value: f64, edges: &[f64]) -> Option<usize> {
    let bins = edges.len().checked_sub(1).filter(|&b| b > 0)?;
    let lo = edges[0];
    let hi = edges[bins];
    if !(value >= lo && value <= hi) {
        return None;
    }

    let mut idx = if hi > lo {
        (((value - lo) / (hi - lo)) * bins as f64) as usize
    } else {
        0
    };
    if idx >= bins {
        idx = bins - 1;
    }

    if value < edges[idx] {
        idx -= 1;
    } else if idx + 1 < bins && value >= edges[idx + 1] {
        idx += 1;
    }
    Some(idx)
}

/// Per-bin sample counts over equal-width edges
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Histogram `values` over precomputed edges.
    ///
    /// Values outside `[edges[0], edges[last]]` are not counted.
    pub fn from_edges(values: &[f64], edges: Vec<f64>) -> Self {
        let mut counts = vec![0usize; edges.len().saturating_sub(1)];
        for &v in values {
            if let Some(idx) = bin_index(v, &edges) {
                counts[idx] += 1;
            }
        }
        Self { edges, counts }
    }

    /// Width of every bin
    pub fn width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }
}
