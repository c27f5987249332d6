//! Block-to-thumbnail matching
//!
//! Scorers describe buffers and measure distances; the search picks the
//! closest library entry for each block.

/// Joint colour histograms and the chi-square scorer
pub mod histogram;
/// Candidate thumbnail collections
pub mod library;
/// Scorer abstraction and the pixel-error strategy
pub mod scorer;
/// Linear nearest-match search
pub mod search;

pub use histogram::{ColorHistogram, HistogramScorer};
pub use library::ThumbnailLibrary;
pub use scorer::{PixelErrorScorer, Scorer, Strategy};
pub use search::{Match, nearest_match, nearest_thumbnail};
