//! Report module - summarizing and exporting fitted bins

pub mod binning_export;
pub mod summary;

pub use binning_export::*;
pub use summary::*;
