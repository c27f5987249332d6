//! Spatial layout of the mosaic
//!
//! This module contains:
//! - Partitioning a square target into an equal block grid
//! - Reassembling matched thumbnails at their grid positions

/// Mosaic grid reassembly
pub mod assembly;
/// Block grid partitioning
pub mod partition;

pub use assembly::MosaicGrid;
pub use partition::{BlockGrid, partition};
