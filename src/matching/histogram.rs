//! Joint colour histograms and chi-square comparison
//!
//! Each channel is quantized into `bins` equal ranges over `[0, 256)`, giving
//! `bins^3` joint bins. Counts are L2-normalized so buffers of different sizes
//! produce comparable histograms. Greyscale samples are treated as `(v, v, v)`.

use crate::buffer::{ChannelMode, PixelBuffer};
use crate::io::configuration::{
    HISTOGRAM_BINS_PER_CHANNEL, MAX_HISTOGRAM_BINS_PER_CHANNEL, SAMPLE_LEVELS,
};
use crate::io::error::{MosaicError, Result, invalid_parameter, shape_mismatch};
use crate::matching::scorer::Scorer;
use ndarray::Axis;

/// L2-normalized joint histogram over three channels
#[derive(Clone, Debug, PartialEq)]
pub struct ColorHistogram {
    bins_per_channel: usize,
    values: Vec<f64>,
}

impl ColorHistogram {
    /// Count, then normalize, the samples of a buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is empty or `bins_per_channel` is outside `1..=64`
    pub fn from_buffer(buffer: &PixelBuffer, bins_per_channel: usize) -> Result<Self> {
        validate_bins(bins_per_channel)?;
        if buffer.is_empty() {
            return Err(MosaicError::EmptyInput {
                operation: "histogram",
            });
        }

        let bin_of = |sample: u8| usize::from(sample) * bins_per_channel / SAMPLE_LEVELS;
        let mut counts = vec![0.0_f64; bins_per_channel.pow(3)];

        let samples = buffer.samples();
        for pixel in samples.lanes(Axis(2)) {
            let (r, g, b) = match buffer.mode() {
                ChannelMode::Grey => {
                    let v = pixel.get(0).copied().unwrap_or(0);
                    (v, v, v)
                }
                ChannelMode::Rgb => (
                    pixel.get(0).copied().unwrap_or(0),
                    pixel.get(1).copied().unwrap_or(0),
                    pixel.get(2).copied().unwrap_or(0),
                ),
            };
            let index = (bin_of(r) * bins_per_channel + bin_of(g)) * bins_per_channel + bin_of(b);
            if let Some(count) = counts.get_mut(index) {
                *count += 1.0;
            }
        }

        let norm = counts.iter().map(|c| c * c).sum::<f64>().sqrt();
        if norm > 0.0 {
            for count in &mut counts {
                *count /= norm;
            }
        }

        Ok(Self {
            bins_per_channel,
            values: counts,
        })
    }

    /// Bins per channel
    pub const fn bins_per_channel(&self) -> usize {
        self.bins_per_channel
    }

    /// Normalized bin values, red-major then green then blue
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of the joint bin `(r, g, b)`
    pub fn bin(&self, r: usize, g: usize, b: usize) -> Option<f64> {
        let n = self.bins_per_channel;
        if r >= n || g >= n || b >= n {
            return None;
        }
        self.values.get((r * n + g) * n + b).copied()
    }

    /// Symmetric chi-square distance `sum (a - b)^2 / (a + b)`
    ///
    /// Bins empty in both histograms contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the histograms use different bin counts
    pub fn chi_square(&self, other: &Self) -> Result<f64> {
        if self.bins_per_channel != other.bins_per_channel {
            return Err(shape_mismatch(
                (self.values.len(), 0, 0),
                (other.values.len(), 0, 0),
            ));
        }

        Ok(self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| {
                let denominator = a + b;
                if denominator > 0.0 {
                    (a - b) * (a - b) / denominator
                } else {
                    0.0
                }
            })
            .sum())
    }
}

fn validate_bins(bins_per_channel: usize) -> Result<()> {
    if (1..=MAX_HISTOGRAM_BINS_PER_CHANNEL).contains(&bins_per_channel) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "bins_per_channel",
            &bins_per_channel,
            &format!("must be between 1 and {MAX_HISTOGRAM_BINS_PER_CHANNEL}"),
        ))
    }
}

/// Histogram strategy comparing colour distributions
#[derive(Clone, Copy, Debug)]
pub struct HistogramScorer {
    bins_per_channel: usize,
}

impl Default for HistogramScorer {
    fn default() -> Self {
        Self {
            bins_per_channel: HISTOGRAM_BINS_PER_CHANNEL,
        }
    }
}

impl HistogramScorer {
    /// Scorer with a custom number of bins per channel
    ///
    /// # Errors
    ///
    /// Returns an error if `bins_per_channel` is outside `1..=64`
    pub fn with_bins(bins_per_channel: usize) -> Result<Self> {
        validate_bins(bins_per_channel)?;
        Ok(Self { bins_per_channel })
    }

    /// Bins per channel used for descriptors
    pub const fn bins_per_channel(&self) -> usize {
        self.bins_per_channel
    }
}

impl Scorer for HistogramScorer {
    type Descriptor = ColorHistogram;

    fn descriptor(&self, buffer: &PixelBuffer) -> Result<ColorHistogram> {
        ColorHistogram::from_buffer(buffer, self.bins_per_channel)
    }

    fn distance(&self, a: &ColorHistogram, b: &ColorHistogram) -> Result<f64> {
        a.chi_square(b)
    }
}
