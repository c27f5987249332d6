//! Similarity scoring between pixel buffers
//!
//! A scorer turns a buffer into a comparable descriptor and measures the
//! distance between two descriptors. Lower distances mean closer matches and
//! zero means identical descriptors. Search and composition are generic over
//! [`Scorer`], so adding a strategy means adding an implementor.

use crate::buffer::PixelBuffer;
use crate::io::error::{MosaicError, Result, shape_mismatch};

/// Descriptor extraction and distance measurement
pub trait Scorer {
    /// Feature summary derived from a buffer
    type Descriptor;

    /// Derive the descriptor of a buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be described (for example when empty)
    fn descriptor(&self, buffer: &PixelBuffer) -> Result<Self::Descriptor>;

    /// Non-negative distance between two descriptors
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptors are not comparable
    fn distance(&self, a: &Self::Descriptor, b: &Self::Descriptor) -> Result<f64>;
}

/// Selectable scoring strategies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Mean squared error over raw samples
    PixelError,
    /// Chi-square distance between normalized colour histograms
    #[default]
    Histogram,
}

/// Raw-pixel mean squared error
///
/// Both comparands must share height, width and channel count.
#[derive(Clone, Copy, Debug, Default)]
pub struct PixelErrorScorer;

impl Scorer for PixelErrorScorer {
    type Descriptor = PixelBuffer;

    fn descriptor(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        if buffer.is_empty() {
            return Err(MosaicError::EmptyInput {
                operation: "pixel error descriptor",
            });
        }
        Ok(buffer.clone())
    }

    fn distance(&self, a: &PixelBuffer, b: &PixelBuffer) -> Result<f64> {
        mean_squared_error(a, b)
    }
}

/// Mean of squared per-sample differences across all channels
///
/// # Errors
///
/// Returns an error if the shapes differ or the buffers are empty
pub fn mean_squared_error(a: &PixelBuffer, b: &PixelBuffer) -> Result<f64> {
    if a.shape() != b.shape() {
        return Err(shape_mismatch(a.shape(), b.shape()));
    }
    if a.is_empty() {
        return Err(MosaicError::EmptyInput {
            operation: "mean squared error",
        });
    }

    let a_samples = a.samples();
    let b_samples = b.samples();
    let total: f64 = a_samples
        .iter()
        .zip(b_samples.iter())
        .map(|(&x, &y)| {
            let diff = f64::from(x) - f64::from(y);
            diff * diff
        })
        .sum();

    Ok(total / a_samples.len() as f64)
}
