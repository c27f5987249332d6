//! Ordered, size-homogeneous collection of candidate thumbnails

use crate::buffer::{ChannelMode, PixelBuffer};
use crate::io::error::{MosaicError, Result, shape_mismatch};

/// Candidate thumbnails for one composition run
///
/// Never empty. Every thumbnail is square with the same side length and
/// channel mode, so any of them can fill any cell of the mosaic.
#[derive(Clone, Debug)]
pub struct ThumbnailLibrary {
    thumbnails: Vec<PixelBuffer>,
    thumb_size: usize,
    mode: ChannelMode,
}

impl ThumbnailLibrary {
    /// Validate and wrap a list of thumbnails, keeping their order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The list is empty
    /// - The first thumbnail is empty or not square
    /// - Any thumbnail differs in shape or channel mode from the first
    pub fn new(thumbnails: Vec<PixelBuffer>) -> Result<Self> {
        let first = thumbnails.first().ok_or(MosaicError::EmptyLibrary)?;
        if first.is_empty() {
            return Err(MosaicError::EmptyInput {
                operation: "thumbnail library",
            });
        }
        if !first.is_square() {
            return Err(shape_mismatch(
                (first.height(), first.height(), first.channels()),
                first.shape(),
            ));
        }

        let expected = first.shape();
        let (thumb_size, mode) = (first.height(), first.mode());
        if let Some(odd_one) = thumbnails.iter().find(|thumb| thumb.shape() != expected) {
            return Err(shape_mismatch(expected, odd_one.shape()));
        }

        Ok(Self {
            thumbnails,
            thumb_size,
            mode,
        })
    }

    /// Side length shared by every thumbnail
    pub const fn thumb_size(&self) -> usize {
        self.thumb_size
    }

    /// Channel mode shared by every thumbnail
    pub const fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// Number of thumbnails
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    /// True when the library holds no thumbnails
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    /// Thumbnail at a library index
    pub fn get(&self, index: usize) -> Option<&PixelBuffer> {
        self.thumbnails.get(index)
    }

    /// All thumbnails in library order
    pub fn thumbnails(&self) -> &[PixelBuffer] {
        &self.thumbnails
    }

    /// Convert every thumbnail to another channel mode
    pub fn to_mode(&self, mode: ChannelMode) -> Self {
        if mode == self.mode {
            return self.clone();
        }
        Self {
            thumbnails: self
                .thumbnails
                .iter()
                .map(|thumb| thumb.to_mode(mode))
                .collect(),
            thumb_size: self.thumb_size,
            mode,
        }
    }
}
