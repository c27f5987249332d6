//! Reassembly of matched thumbnails into a single mosaic buffer

use crate::buffer::{ChannelMode, PixelBuffer};
use crate::io::error::{MosaicError, Result, invalid_parameter, shape_mismatch};

/// Row-major arrangement of the thumbnails selected for each block
///
/// Cells are filled in block order; the grid is consumed once by
/// [`MosaicGrid::assemble`].
#[derive(Debug)]
pub struct MosaicGrid<'a> {
    block_count: usize,
    thumb_size: usize,
    mode: ChannelMode,
    capacity: usize,
    side: usize,
    cells: Vec<&'a PixelBuffer>,
}

impl<'a> MosaicGrid<'a> {
    /// Create an empty grid of `block_count x block_count` cells
    ///
    /// # Errors
    ///
    /// Returns an error if the cell count or the output size overflows `usize`
    pub fn new(block_count: usize, thumb_size: usize, mode: ChannelMode) -> Result<Self> {
        let too_large = || {
            invalid_parameter(
                "block_count",
                &block_count,
                &format!("a grid of {thumb_size}px thumbnails this large overflows the output size"),
            )
        };
        let capacity = block_count.checked_mul(block_count).ok_or_else(too_large)?;
        let side = block_count.checked_mul(thumb_size).ok_or_else(too_large)?;
        side.checked_mul(side)
            .and_then(|area| area.checked_mul(mode.channels()))
            .filter(|&len| isize::try_from(len).is_ok())
            .ok_or_else(too_large)?;

        Ok(Self {
            block_count,
            thumb_size,
            mode,
            capacity,
            side,
            cells: Vec::new(),
        })
    }

    /// Number of cells in the completed grid
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cells filled so far
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell has been filled
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell has a thumbnail
    pub fn is_complete(&self) -> bool {
        self.cells.len() == self.capacity()
    }

    /// Place the thumbnail for the next block
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The thumbnail is not `thumb_size x thumb_size` in the grid's channel mode
    /// - Every cell is already filled
    pub fn push(&mut self, thumbnail: &'a PixelBuffer) -> Result<()> {
        let expected = (self.thumb_size, self.thumb_size, self.mode.channels());
        if thumbnail.shape() != expected {
            return Err(shape_mismatch(expected, thumbnail.shape()));
        }
        if self.is_complete() {
            return Err(invalid_parameter(
                "thumbnail",
                &self.cells.len(),
                &format!("grid already holds {} thumbnails", self.capacity()),
            ));
        }
        self.cells.push(thumbnail);
        Ok(())
    }

    /// Write every thumbnail at its block position in a newly allocated buffer
    ///
    /// Thumbnail `i * n + j` lands at pixel offset `(i * thumb_size, j * thumb_size)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is incomplete
    pub fn assemble(self) -> Result<PixelBuffer> {
        if !self.is_complete() {
            return Err(invalid_parameter(
                "grid",
                &self.cells.len(),
                &format!("{} thumbnails are required", self.capacity()),
            ));
        }
        if self.thumb_size == 0 {
            return Err(MosaicError::EmptyInput {
                operation: "assemble",
            });
        }

        let mut output = PixelBuffer::new(self.side, self.side, self.mode);
        for (index, thumbnail) in self.cells.iter().enumerate() {
            let row = index / self.block_count * self.thumb_size;
            let col = index % self.block_count * self.thumb_size;
            output.paste(thumbnail, row, col)?;
        }
        Ok(output)
    }
}

/// Assemble thumbnails listed in row-major block order
///
/// The channel mode is taken from the first thumbnail.
///
/// # Errors
///
/// Returns an error if the list is empty, has the wrong length, holds a
/// thumbnail of the wrong shape, or the grid is too large to allocate
pub fn assemble(
    thumbnails: &[&PixelBuffer],
    block_count: usize,
    thumb_size: usize,
) -> Result<PixelBuffer> {
    let mode = thumbnails
        .first()
        .map(|thumb| thumb.mode())
        .ok_or(MosaicError::EmptyInput {
            operation: "assemble",
        })?;

    let mut grid = MosaicGrid::new(block_count, thumb_size, mode)?;
    for &thumbnail in thumbnails {
        grid.push(thumbnail)?;
    }
    grid.assemble()
}
