//! Pixel buffers shared by every stage of mosaic composition
//!
//! A buffer is a `(height, width, channels)` array of 8-bit samples holding
//! either one greyscale channel or three RGB channels.

use crate::io::error::{MosaicError, Result, invalid_parameter};
use ndarray::{Array3, ArrayView3, Axis, Slice};

/// Channel layout of a pixel buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Single intensity channel
    Grey,
    /// Red, green and blue channels
    Rgb,
}

impl ChannelMode {
    /// Number of samples per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Grey => 1,
            Self::Rgb => 3,
        }
    }

    /// Map a channel count back to a mode
    ///
    /// # Errors
    ///
    /// Returns an error for any count other than 1 or 3
    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            1 => Ok(Self::Grey),
            3 => Ok(Self::Rgb),
            other => Err(invalid_parameter(
                "channels",
                &other,
                &"pixel buffers hold 1 (grey) or 3 (RGB) channels",
            )),
        }
    }
}

/// Rectangular grid of 8-bit samples
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    samples: Array3<u8>,
    mode: ChannelMode,
}

impl PixelBuffer {
    /// Create a black buffer
    pub fn new(height: usize, width: usize, mode: ChannelMode) -> Self {
        Self {
            samples: Array3::zeros((height, width, mode.channels())),
            mode,
        }
    }

    /// Create a buffer where every pixel has the given colour
    ///
    /// The colour slice length selects the mode (1 = grey, 3 = RGB).
    ///
    /// # Errors
    ///
    /// Returns an error if the colour does not have 1 or 3 components
    pub fn filled(height: usize, width: usize, color: &[u8]) -> Result<Self> {
        let mode = ChannelMode::from_channels(color.len())?;
        let samples = Array3::from_shape_fn((height, width, mode.channels()), |(_, _, c)| {
            color.get(c).copied().unwrap_or(0)
        });
        Ok(Self { samples, mode })
    }

    /// Wrap an existing `(height, width, channels)` array
    ///
    /// # Errors
    ///
    /// Returns an error if the channel axis is not 1 or 3 long
    pub fn from_array(samples: Array3<u8>) -> Result<Self> {
        let mode = ChannelMode::from_channels(samples.dim().2)?;
        Ok(Self { samples, mode })
    }

    /// Build a buffer from interleaved row-major samples
    ///
    /// # Errors
    ///
    /// Returns an error if the sample count does not match the dimensions
    pub fn from_samples(
        height: usize,
        width: usize,
        mode: ChannelMode,
        samples: Vec<u8>,
    ) -> Result<Self> {
        let found = samples.len();
        let samples = Array3::from_shape_vec((height, width, mode.channels()), samples)
            .map_err(|_shape_error| MosaicError::ShapeMismatch {
                expected: (height, width, mode.channels()),
                found: (found, 1, 1),
            })?;
        Ok(Self { samples, mode })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.samples.dim().0
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.samples.dim().1
    }

    /// Number of samples per pixel
    pub const fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// Channel layout
    pub const fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// `(height, width, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.samples.dim()
    }

    /// True when the buffer has no pixels
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// True when height equals width
    pub fn is_square(&self) -> bool {
        self.height() == self.width()
    }

    /// Read-only view of the samples
    pub fn samples(&self) -> ArrayView3<'_, u8> {
        self.samples.view()
    }

    /// Sample at `(row, col, channel)`, `None` when out of bounds
    pub fn sample(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.samples.get((row, col, channel)).copied()
    }

    /// All samples of the pixel at `(row, col)`
    pub fn pixel(&self, row: usize, col: usize) -> Option<Vec<u8>> {
        (row < self.height() && col < self.width())
            .then(|| {
                self.samples
                    .index_axis(Axis(0), row)
                    .index_axis(Axis(0), col)
                    .to_vec()
            })
    }

    /// Samples in row-major interleaved order
    pub fn to_raw(&self) -> Vec<u8> {
        self.samples.iter().copied().collect()
    }

    /// Copy out the rectangle starting at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle extends past the buffer
    pub fn region(&self, row: usize, col: usize, height: usize, width: usize) -> Result<Self> {
        if row + height > self.height() || col + width > self.width() {
            return Err(MosaicError::ShapeMismatch {
                expected: (self.height(), self.width(), self.channels()),
                found: (row + height, col + width, self.channels()),
            });
        }
        let mut view = self.samples.view();
        view.slice_axis_inplace(Axis(0), Slice::from(row..row + height));
        view.slice_axis_inplace(Axis(1), Slice::from(col..col + width));
        Ok(Self {
            samples: view.to_owned(),
            mode: self.mode,
        })
    }

    /// Overwrite the rectangle at `(row, col)` with another buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the modes differ or the patch does not fit
    pub fn paste(&mut self, patch: &Self, row: usize, col: usize) -> Result<()> {
        if patch.mode != self.mode
            || row + patch.height() > self.height()
            || col + patch.width() > self.width()
        {
            return Err(MosaicError::ShapeMismatch {
                expected: (
                    self.height().saturating_sub(row),
                    self.width().saturating_sub(col),
                    self.channels(),
                ),
                found: patch.shape(),
            });
        }
        let mut target = self.samples.view_mut();
        target.slice_axis_inplace(Axis(0), Slice::from(row..row + patch.height()));
        target.slice_axis_inplace(Axis(1), Slice::from(col..col + patch.width()));
        target.assign(&patch.samples);
        Ok(())
    }

    /// Convert to another channel layout
    ///
    /// RGB to grey uses the ITU-R 601-2 luma transform with integer rounding;
    /// grey to RGB replicates the intensity.
    pub fn to_mode(&self, mode: ChannelMode) -> Self {
        if mode == self.mode {
            return self.clone();
        }
        let (height, width, _) = self.samples.dim();
        let samples = match mode {
            ChannelMode::Grey => {
                let luma: Vec<u8> = self
                    .samples
                    .lanes(Axis(2))
                    .into_iter()
                    .map(|px| {
                        let r = u32::from(px.get(0).copied().unwrap_or(0));
                        let g = u32::from(px.get(1).copied().unwrap_or(0));
                        let b = u32::from(px.get(2).copied().unwrap_or(0));
                        ((r * 19_595 + g * 38_470 + b * 7_471 + 0x8000) >> 16) as u8
                    })
                    .collect();
                Array3::from_shape_fn((height, width, 1), |(row, col, _)| {
                    luma.get(row * width + col).copied().unwrap_or(0)
                })
            }
            ChannelMode::Rgb => {
                Array3::from_shape_fn((height, width, 3), |(row, col, _)| {
                    self.samples.get((row, col, 0)).copied().unwrap_or(0)
                })
            }
        };
        Self { samples, mode }
    }
}
