//! Composition pipeline: partition, match every block, assemble

/// Step-wise composer, run configuration and results
pub mod composer;

pub use composer::{Composer, Mosaic, MosaicConfig, Selection, compose};
