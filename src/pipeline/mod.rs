//! Pipeline module - bin selection, fitting and dataset plumbing

pub mod batch;
pub mod config;
pub mod error;
pub mod histogram;
pub mod likelihood;
pub mod loader;
pub mod model;
pub mod selector;

pub use batch::*;
pub use config::*;
pub use error::BinningError;
pub use loader::*;
pub use model::{BinSummary, FittedBins, OptimalBin, Transformer};
pub use selector::{candidate_bin_counts, select_bin_count, BinSelection, CandidateScore};
