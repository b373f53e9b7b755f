//! Error types for bin selection, fitting and transformation.

use thiserror::Error;

/// Errors raised by the binning estimator.
///
/// All variants describe deterministic domain violations. A failed `fit`
/// leaves any previously fitted state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinningError {
    /// Inputs cannot be binned: mismatched lengths, too few samples,
    /// or non-finite values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `transform` was called before a successful `fit`.
    #[error("Model is not fitted: call fit() before transform()")]
    NotFitted,

    /// Every predictor value is identical, so the histogram has zero width.
    #[error("Degenerate input: all predictor values equal {value}, bin width would be zero")]
    DegenerateInput {
        /// The single distinct predictor value
        value: f64,
    },

    /// Configuration outside its valid domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
