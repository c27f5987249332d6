//! Square grid partitioning of target buffers
//!
//! Blocks are numbered row-major: block `i * n + j` sits in grid row `i` and
//! grid column `j`. The same numbering is used when matched thumbnails are
//! written back by the assembler.

use crate::buffer::PixelBuffer;
use crate::io::error::{MosaicError, Result, invalid_parameter};

/// Geometry of an `n x n` grid of equal square blocks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    /// Number of blocks along each side
    pub block_count: usize,
    /// Side length of one block in pixels
    pub block_side: usize,
}

impl BlockGrid {
    /// Derive the grid for a square buffer split into `block_count` blocks per side
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer has no pixels
    /// - `block_count` is zero
    /// - The buffer is not square
    /// - The side length is not divisible by `block_count`
    pub fn for_buffer(buffer: &PixelBuffer, block_count: usize) -> Result<Self> {
        if buffer.is_empty() {
            return Err(MosaicError::EmptyInput {
                operation: "partition",
            });
        }
        if block_count == 0 {
            return Err(invalid_parameter(
                "block_count",
                &block_count,
                &"at least one block per side is required",
            ));
        }

        let (height, width) = (buffer.height(), buffer.width());
        if height != width {
            return Err(MosaicError::Dimension {
                height,
                width,
                block_count,
                reason: "buffer is not square",
            });
        }
        if height % block_count != 0 {
            return Err(MosaicError::Dimension {
                height,
                width,
                block_count,
                reason: "side length is not divisible by the block count",
            });
        }

        Ok(Self {
            block_count,
            block_side: height / block_count,
        })
    }

    /// Total number of blocks
    pub const fn len(&self) -> usize {
        self.block_count * self.block_count
    }

    /// True when the grid holds no blocks
    pub const fn is_empty(&self) -> bool {
        self.block_count == 0
    }

    /// Grid `(row, col)` of a row-major block index
    pub const fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.block_count, index % self.block_count)
    }

    /// Pixel offset `(row, col)` of the top-left corner of a block
    pub const fn block_origin(&self, index: usize) -> (usize, usize) {
        let (row, col) = self.cell(index);
        (row * self.block_side, col * self.block_side)
    }
}

/// Split a square buffer into `block_count * block_count` equal blocks
///
/// # Errors
///
/// Returns an error under the same conditions as [`BlockGrid::for_buffer`]
pub fn partition(buffer: &PixelBuffer, block_count: usize) -> Result<Vec<PixelBuffer>> {
    let grid = BlockGrid::for_buffer(buffer, block_count)?;

    (0..grid.len())
        .map(|index| {
            let (row, col) = grid.block_origin(index);
            buffer.region(row, col, grid.block_side, grid.block_side)
        })
        .collect()
}

/// Number of blocks per side when a side of `side` pixels is cut into `block_size` blocks
///
/// # Errors
///
/// Returns an error if `block_size` is zero or does not divide `side`
pub fn block_count_for(side: usize, block_size: usize) -> Result<usize> {
    if block_size == 0 {
        return Err(invalid_parameter(
            "block_size",
            &block_size,
            &"blocks must be at least one pixel wide",
        ));
    }
    if side == 0 || side % block_size != 0 {
        return Err(MosaicError::Dimension {
            height: side,
            width: side,
            block_count: side / block_size,
            reason: "side length is not a positive multiple of the block size",
        });
    }
    Ok(side / block_size)
}
