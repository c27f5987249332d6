//! Error types for mosaic composition and its file-level collaborators

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Target is not square or its side is not divisible by the block count
    Dimension {
        /// Buffer height in pixels
        height: usize,
        /// Buffer width in pixels
        width: usize,
        /// Requested number of blocks per side
        block_count: usize,
        /// Which precondition failed
        reason: &'static str,
    },

    /// Two buffers or descriptors cannot be compared or combined
    ShapeMismatch {
        /// Expected shape (height, width, channels) or (bins, 0, 0)
        expected: (usize, usize, usize),
        /// Shape actually supplied
        found: (usize, usize, usize),
    },

    /// Matching was requested against a library with no thumbnails
    EmptyLibrary,

    /// A buffer with zero rows or columns reached an operation that needs pixels
    EmptyInput {
        /// Operation that received the empty buffer
        operation: &'static str,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or save an image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A CSV pixel grid could not be parsed
    MalformedGrid {
        /// Path of the grid file (`<memory>` for in-memory parsing)
        path: PathBuf,
        /// 1-based line number of the offending row
        line: usize,
        /// Description of the problem
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension {
                height,
                width,
                block_count,
                reason,
            } => {
                write!(
                    f,
                    "Cannot split {height}x{width} buffer into {block_count}x{block_count} blocks: {reason}"
                )
            }
            Self::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Shape mismatch: expected {}x{}x{}, found {}x{}x{}",
                    expected.0, expected.1, expected.2, found.0, found.1, found.2
                )
            }
            Self::EmptyLibrary => write!(f, "Thumbnail library contains no thumbnails"),
            Self::EmptyInput { operation } => {
                write!(f, "Empty buffer supplied to {operation}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::MalformedGrid { path, line, reason } => {
                write!(
                    f,
                    "Malformed pixel grid '{}' at line {line}: {reason}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a shape mismatch error from two `(height, width, channels)` triples
pub const fn shape_mismatch(
    expected: (usize, usize, usize),
    found: (usize, usize, usize),
) -> MosaicError {
    MosaicError::ShapeMismatch { expected, found }
}
