//! Optibin: Likelihood-Optimal Binning Library
//!
//! Piecewise-constant regression of a target against a continuous predictor.
//! The bin count is chosen by maximizing a histogram likelihood over the
//! predictor, and each bin predicts the mean target of its fitting samples.
//!
//! ```no_run
//! use optibin::pipeline::{OptimalBin, Transformer};
//!
//! let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
//! let y: Vec<f64> = (0..100).map(|i| (i % 2) as f64).collect();
//!
//! let mut model = OptimalBin::default();
//! model.fit(&x, &y)?;
//! let predicted = model.transform(&[0.0, 50.0, 99.0])?;
//! # Ok::<(), optibin::pipeline::BinningError>(())
//! ```

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
