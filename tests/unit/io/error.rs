//! Tests for error formatting and source chaining

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::error::{invalid_parameter, shape_mismatch};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests dimension errors name the buffer and block count
    // Verified by omitting the reason from the message
    #[test]
    fn test_dimension_display() {
        let err = MosaicError::Dimension {
            height: 30,
            width: 30,
            block_count: 4,
            reason: "side is not divisible by the block count",
        };
        assert_eq!(
            err.to_string(),
            "Cannot split 30x30 buffer into 4x4 blocks: side is not divisible by the block count"
        );
    }

    // Tests helper constructors fill the expected variants
    // Verified by swapping expected and found
    #[test]
    fn test_helper_constructors() {
        let err = shape_mismatch((4, 4, 3), (2, 2, 1));
        assert_eq!(err.to_string(), "Shape mismatch: expected 4x4x3, found 2x2x1");

        let err = invalid_parameter("block_size", &0, &"must be positive");
        assert!(matches!(
            &err,
            MosaicError::InvalidParameter { parameter: "block_size", value, .. } if value == "0"
        ));
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'block_size' = '0': must be positive"
        );
    }

    // Tests grid errors report path and line
    // Verified by printing the line index from zero
    #[test]
    fn test_malformed_grid_display() {
        let err = MosaicError::MalformedGrid {
            path: PathBuf::from("thumbs/a.csv"),
            line: 3,
            reason: "invalid sample 'x'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed pixel grid 'thumbs/a.csv' at line 3: invalid sample 'x'"
        );
    }

    // Tests wrapped I/O errors are exposed as sources
    // Verified by returning None for every variant
    #[test]
    fn test_error_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = MosaicError::from(io);
        assert!(matches!(err, MosaicError::FileSystem { .. }));
        assert!(err.source().is_some());

        assert!(MosaicError::EmptyLibrary.source().is_none());
        assert!(
            MosaicError::EmptyInput {
                operation: "partition"
            }
            .source()
            .is_none()
        );
        assert_eq!(
            MosaicError::EmptyLibrary.to_string(),
            "Thumbnail library contains no thumbnails"
        );
    }
}
