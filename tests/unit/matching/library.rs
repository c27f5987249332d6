//! Tests for thumbnail library validation

#[cfg(test)]
mod tests {
    use photomosaic::buffer::{ChannelMode, PixelBuffer};
    use photomosaic::matching::library::ThumbnailLibrary;
    use photomosaic::{MosaicError, Result};

    // Tests a homogeneous library keeps order and reports its geometry
    // Verified by sorting thumbnails on construction
    #[test]
    fn test_library_keeps_order() -> Result<()> {
        let library = ThumbnailLibrary::new(vec![
            PixelBuffer::filled(3, 3, &[9])?,
            PixelBuffer::filled(3, 3, &[1])?,
        ])?;

        assert_eq!(library.len(), 2);
        assert!(!library.is_empty());
        assert_eq!(library.thumb_size(), 3);
        assert_eq!(library.mode(), ChannelMode::Grey);
        assert_eq!(library.get(0).and_then(|t| t.sample(0, 0, 0)), Some(9));
        assert!(library.get(2).is_none());
        Ok(())
    }

    // Tests an empty list is rejected
    // Verified by allowing empty libraries
    #[test]
    fn test_library_rejects_empty() {
        assert!(matches!(
            ThumbnailLibrary::new(Vec::new()),
            Err(MosaicError::EmptyLibrary)
        ));
    }

    // Tests mixed sizes, modes and non-square thumbnails are rejected
    // Verified by comparing only heights
    #[test]
    fn test_library_rejects_heterogeneous() -> Result<()> {
        let mixed_size = ThumbnailLibrary::new(vec![
            PixelBuffer::filled(3, 3, &[0])?,
            PixelBuffer::filled(4, 4, &[0])?,
        ]);
        assert!(matches!(mixed_size, Err(MosaicError::ShapeMismatch { .. })));

        let mixed_mode = ThumbnailLibrary::new(vec![
            PixelBuffer::filled(3, 3, &[0])?,
            PixelBuffer::filled(3, 3, &[0, 0, 0])?,
        ]);
        assert!(matches!(mixed_mode, Err(MosaicError::ShapeMismatch { .. })));

        let oblong = ThumbnailLibrary::new(vec![PixelBuffer::filled(3, 4, &[0])?]);
        assert!(matches!(oblong, Err(MosaicError::ShapeMismatch { .. })));

        let empty = ThumbnailLibrary::new(vec![PixelBuffer::new(0, 0, ChannelMode::Grey)]);
        assert!(matches!(empty, Err(MosaicError::EmptyInput { .. })));
        Ok(())
    }

    // Tests mode conversion applies to every thumbnail
    // Verified by converting only the first thumbnail
    #[test]
    fn test_library_to_mode() -> Result<()> {
        let library = ThumbnailLibrary::new(vec![
            PixelBuffer::filled(2, 2, &[255, 0, 0])?,
            PixelBuffer::filled(2, 2, &[0, 0, 255])?,
        ])?;
        let grey = library.to_mode(ChannelMode::Grey);

        assert_eq!(grey.mode(), ChannelMode::Grey);
        assert!(grey.thumbnails().iter().all(|t| t.channels() == 1));
        assert_eq!(grey.get(1).and_then(|t| t.sample(1, 1, 0)), Some(29));
        Ok(())
    }
}
