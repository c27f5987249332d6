//! Photomosaic composition: rebuild a square target image as a grid of thumbnails
//!
//! The target is cut into equal square blocks, every block is compared with a
//! library of thumbnails under a pluggable similarity metric, and the closest
//! thumbnails are written back at their block positions.

#![forbid(unsafe_code)]

/// Pixel buffers and channel layouts
pub mod buffer;
/// Input/output collaborators, configuration and error handling
pub mod io;
/// Similarity scoring, thumbnail libraries and nearest-match search
pub mod matching;
/// End-to-end composition pipeline
pub mod pipeline;
/// Block partitioning and mosaic reassembly
pub mod spatial;

pub use buffer::{ChannelMode, PixelBuffer};
pub use io::error::{MosaicError, Result};
pub use matching::{Strategy, ThumbnailLibrary};
pub use pipeline::{Mosaic, MosaicConfig, compose};
