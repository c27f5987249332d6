//! Tests for square block partitioning and grid geometry

#[cfg(test)]
mod tests {
    use photomosaic::buffer::{ChannelMode, PixelBuffer};
    use photomosaic::spatial::partition::{BlockGrid, block_count_for, partition};
    use photomosaic::{MosaicError, Result};

    fn numbered(side: usize) -> Result<PixelBuffer> {
        let samples = (0..side * side).map(|v| (v % 256) as u8).collect();
        PixelBuffer::from_samples(side, side, ChannelMode::Grey, samples)
    }

    // Tests block count and side length of a regular split
    // Verified by using block_count as the block side
    #[test]
    fn test_partition_produces_equal_blocks() -> Result<()> {
        let blocks = partition(&numbered(6)?, 3)?;
        assert_eq!(blocks.len(), 9);
        assert!(blocks.iter().all(|b| b.shape() == (2, 2, 1)));
        Ok(())
    }

    // Tests blocks are ordered row-major
    // Verified by swapping row and column in block_origin
    #[test]
    fn test_partition_row_major_order() -> Result<()> {
        let buffer = numbered(4)?;
        let blocks = partition(&buffer, 2)?;

        // Block 1 is row 0, column 1: top-right quadrant starts at sample 2
        assert_eq!(blocks.get(1).and_then(|b| b.sample(0, 0, 0)), Some(2));
        // Block 2 is row 1, column 0: bottom-left quadrant starts at sample 8
        assert_eq!(blocks.get(2).and_then(|b| b.sample(0, 0, 0)), Some(8));
        assert_eq!(
            blocks.get(3).map(PixelBuffer::to_raw),
            Some(vec![10, 11, 14, 15])
        );
        Ok(())
    }

    // Tests a single block reproduces the whole buffer
    // Verified by off-by-one in region size
    #[test]
    fn test_partition_single_block() -> Result<()> {
        let buffer = numbered(5)?;
        let blocks = partition(&buffer, 1)?;
        assert_eq!(blocks, vec![buffer]);
        Ok(())
    }

    // Tests non-square targets are rejected
    // Verified by removing the squareness check
    #[test]
    fn test_partition_rejects_non_square() {
        let buffer = PixelBuffer::new(4, 6, ChannelMode::Rgb);
        assert!(matches!(
            partition(&buffer, 2),
            Err(MosaicError::Dimension { .. })
        ));
    }

    // Tests side lengths not divisible by the block count are rejected
    // Verified by flooring the block side silently
    #[test]
    fn test_partition_rejects_indivisible_side() -> Result<()> {
        assert!(matches!(
            partition(&numbered(5)?, 2),
            Err(MosaicError::Dimension { .. })
        ));
        Ok(())
    }

    // Tests zero-size input and zero block count
    // Verified by checking block count before emptiness
    #[test]
    fn test_partition_rejects_empty_and_zero() -> Result<()> {
        let empty = PixelBuffer::new(0, 0, ChannelMode::Grey);
        assert!(matches!(
            partition(&empty, 1),
            Err(MosaicError::EmptyInput { .. })
        ));
        assert!(matches!(
            partition(&numbered(4)?, 0),
            Err(MosaicError::InvalidParameter { .. })
        ));
        Ok(())
    }

    // Tests grid geometry helpers
    // Verified by returning cell instead of pixel origin
    #[test]
    fn test_block_grid_geometry() -> Result<()> {
        let grid = BlockGrid::for_buffer(&numbered(12)?, 3)?;
        assert_eq!(grid.block_side, 4);
        assert_eq!(grid.len(), 9);
        assert!(!grid.is_empty());
        assert_eq!(grid.cell(5), (1, 2));
        assert_eq!(grid.block_origin(5), (4, 8));
        assert_eq!(grid.block_origin(6), (8, 0));
        Ok(())
    }

    // Tests conversion from block size to block count
    // Verified by returning the block size unchanged
    #[test]
    fn test_block_count_for() {
        assert!(matches!(block_count_for(40, 20), Ok(2)));
        assert!(matches!(block_count_for(20, 20), Ok(1)));
        assert!(block_count_for(30, 20).is_err());
        assert!(block_count_for(0, 20).is_err());
        assert!(block_count_for(40, 0).is_err());
    }
}
