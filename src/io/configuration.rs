//! Composition constants and runtime configuration defaults

/// Default side length of a thumbnail in pixels
pub const DEFAULT_THUMB_SIZE: usize = 20;

/// Histogram bins per colour channel (8 bins -> 512 joint bins)
pub const HISTOGRAM_BINS_PER_CHANNEL: usize = 8;

/// Upper bound on bins per channel (64 bins -> 262144 joint bins per descriptor)
pub const MAX_HISTOGRAM_BINS_PER_CHANNEL: usize = 64;

/// Number of distinct values a sample can take
pub const SAMPLE_LEVELS: usize = 256;

// Output settings
/// Default file name for the composed mosaic
pub const DEFAULT_OUTPUT: &str = "mosaic.png";
/// Separator written between values of a CSV pixel grid
pub const GRID_SEPARATOR: &str = ", ";
/// Field width values are right-justified to in a CSV pixel grid
pub const GRID_FIELD_WIDTH: usize = 3;
/// Extension identifying CSV pixel grids in a thumbnail library
pub const GRID_EXTENSION: &str = "csv";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
